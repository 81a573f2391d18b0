//! StudySphere - AI study partner matching
//!
//! StudySphere pairs a student's self-described profile against a candidate
//! roster using a generative model, then hosts a collaboration space with an
//! AI-generated study plan, a simulated group chat, and shared notes.
//!
//! # Core Concepts
//!
//! - **The model ranks, the roster is truth**: matching returns candidate
//!   ids plus rationales; full profiles are re-joined locally and unknown
//!   ids are dropped
//! - **Failures degrade, never crash**: every AI operation has a scripted
//!   or inline-error fallback that keeps the session interactive
//! - **Navigation invalidates**: leaving a view discards its in-flight
//!   work, so stale responses never land on new state
//!
//! # Modules
//!
//! - [`domain`] - Profiles, matches, plans, chat, and whiteboard types
//! - [`directory`] - The static candidate roster and match filtering
//! - [`llm`] - LLM client trait and Gemini implementation
//! - [`gateway`] - The StudyGateway trait over the model's four operations
//! - [`auth`] - Mock credential store
//! - [`session`] - Application state machine and async controller
//! - [`repl`] - Interactive frontend
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod auth;
pub mod cli;
pub mod config;
pub mod directory;
pub mod domain;
pub mod gateway;
pub mod llm;
pub mod prompts;
pub mod repl;
pub mod session;
