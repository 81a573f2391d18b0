//! Shared drawing surface model
//!
//! Single-client simulation: strokes live in memory for one collaboration
//! session and are discarded with it.

use serde::{Deserialize, Serialize};

/// Drawing tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Pen,
    Eraser,
}

/// A single continuous stroke
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub points: Vec<(f32, f32)>,
    pub color: String,
    pub width: f32,
    pub tool: Tool,
}

/// Whiteboard state: completed strokes, an in-progress stroke, and a shared
/// notes buffer
#[derive(Debug, Clone, Default)]
pub struct Whiteboard {
    strokes: Vec<Stroke>,
    current: Option<Stroke>,
    pub notes: String,
}

impl Whiteboard {
    /// Fresh board seeded with a notes header for the session subject
    pub fn for_subject(subject: &str) -> Self {
        Self {
            strokes: Vec::new(),
            current: None,
            notes: format!("Shared notes for {subject}...\n\n"),
        }
    }

    pub fn begin_stroke(&mut self, x: f32, y: f32, color: &str, width: f32, tool: Tool) {
        self.current = Some(Stroke {
            points: vec![(x, y)],
            color: color.to_string(),
            width,
            tool,
        });
    }

    /// Extend the in-progress stroke; no-op when none is active
    pub fn extend_stroke(&mut self, x: f32, y: f32) {
        if let Some(stroke) = self.current.as_mut() {
            stroke.points.push((x, y));
        }
    }

    /// Commit the in-progress stroke to the board
    pub fn finish_stroke(&mut self) {
        if let Some(stroke) = self.current.take() {
            self.strokes.push(stroke);
        }
    }

    /// Remove the most recent completed stroke
    pub fn undo(&mut self) -> Option<Stroke> {
        self.strokes.pop()
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
        self.current = None;
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_lifecycle() {
        let mut board = Whiteboard::for_subject("Calculus");
        assert!(board.notes.starts_with("Shared notes for Calculus"));

        board.begin_stroke(0.0, 0.0, "#000000", 5.0, Tool::Pen);
        board.extend_stroke(1.0, 1.0);
        board.extend_stroke(2.0, 2.0);
        assert!(board.strokes().is_empty());

        board.finish_stroke();
        assert_eq!(board.strokes().len(), 1);
        assert_eq!(board.strokes()[0].points.len(), 3);
    }

    #[test]
    fn test_extend_without_begin_is_noop() {
        let mut board = Whiteboard::default();
        board.extend_stroke(1.0, 1.0);
        board.finish_stroke();
        assert!(board.strokes().is_empty());
    }

    #[test]
    fn test_undo_and_clear() {
        let mut board = Whiteboard::default();
        board.begin_stroke(0.0, 0.0, "#EF4444", 2.0, Tool::Pen);
        board.finish_stroke();
        board.begin_stroke(5.0, 5.0, "#3B82F6", 12.0, Tool::Eraser);
        board.finish_stroke();

        let undone = board.undo().unwrap();
        assert_eq!(undone.tool, Tool::Eraser);
        assert_eq!(board.strokes().len(), 1);

        board.clear();
        assert!(board.strokes().is_empty());
        assert!(board.undo().is_none());
    }
}
