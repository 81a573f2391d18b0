//! REPL session management

use std::time::Duration;

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::auth::AuthStore;
use crate::directory::{AVAILABILITY_OPTIONS, MatchFilter, STUDY_METHODS, SUBJECTS};
use crate::domain::{Match, ProfileDraft};
use crate::session::{AppState, PreviewPoller, SessionController, View};

/// Interactive REPL session
pub struct ReplSession {
    controller: SessionController,
    auth: AuthStore,
    state: AppState,
    filter: MatchFilter,
    poller: Option<PreviewPoller>,
    preview_interval: Duration,
}

impl ReplSession {
    /// Create a new REPL session
    pub fn new(controller: SessionController, auth: AuthStore, preview_interval: Duration) -> Self {
        Self {
            controller,
            auth,
            state: AppState::new(),
            filter: MatchFilter::All,
            poller: None,
            preview_interval,
        }
    }

    /// Run the REPL main loop
    pub async fn run(&mut self) -> Result<()> {
        self.print_welcome();

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        loop {
            let prompt = format!("{} ", format!("[{}]>", self.state.view.display_name()).bright_green());
            let readline = rl.readline(&prompt);

            match readline {
                Ok(line) => {
                    let input = line.trim().to_string();
                    if input.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(&input);

                    if !self.dispatch(&mut rl, &input).await? {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C - just show new prompt
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D - exit
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "StudySphere".bright_cyan().bold());
        println!("AI-powered study partner matching.");
        println!("Type {} for help, {} to quit", "help".yellow(), "quit".yellow());
        println!();
    }

    /// Dispatch one line of input; returns false to exit
    async fn dispatch(&mut self, rl: &mut DefaultEditor, input: &str) -> Result<bool> {
        let (cmd, rest) = match input.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (input, ""),
        };

        match cmd {
            "quit" | "exit" | "q" => return Ok(false),
            "help" | "h" | "?" => {
                self.print_help();
                return Ok(true);
            }
            "dismiss" => {
                self.state.dismiss_error();
                return Ok(true);
            }
            _ => {}
        }

        match self.state.view {
            View::Login => self.dispatch_login(rl, cmd).await?,
            View::Home => self.dispatch_home(cmd).await?,
            View::Profile => self.dispatch_profile(cmd, rest).await?,
            View::Matches => self.dispatch_matches(cmd, rest).await?,
            View::Collaboration => self.dispatch_collaboration(cmd, rest).await?,
        }

        if let Some(error) = &self.state.error {
            println!("{} {}", "!".red(), error.red());
        }
        Ok(true)
    }

    fn print_help(&self) {
        println!();
        match self.state.view {
            View::Login => {
                println!("{}", "Login commands:".bright_cyan());
                println!("  {:12} Sign in to an existing account", "login".yellow());
                println!("  {:12} Create a new account", "signup".yellow());
            }
            View::Home => {
                println!("{}", "Home commands:".bright_cyan());
                println!("  {:12} Fill out your study profile", "profile".yellow());
                println!("  {:12} Sign out", "logout".yellow());
            }
            View::Profile => {
                println!("{}", "Profile commands:".bright_cyan());
                println!("  {:16} Set your display name", "name <text>".yellow());
                println!("  {:16} Toggle a subject you can help with", "offer <n>".yellow());
                println!("  {:16} Toggle a subject you need help with", "need <n>".yellow());
                println!("  {:16} Toggle an availability slot", "avail <n>".yellow());
                println!("  {:16} Choose a study method", "method <n>".yellow());
                println!("  {:16} Show the form and option numbers", "show".yellow());
                println!("  {:16} Submit and find matches", "find".yellow());
                println!("  {:16} Back to home", "home".yellow());
            }
            View::Matches => {
                println!("{}", "Matches commands:".bright_cyan());
                println!("  {:24} Show the match list", "list".yellow());
                println!(
                    "  {:24} Filter: all, friends, individuals, pairs, groups",
                    "filter <which>".yellow()
                );
                println!("  {:24} Show live group activity", "previews".yellow());
                println!("  {:24} Start studying with a match", "study <n>".yellow());
                println!("  {:24} Back to the profile form", "profile".yellow());
                println!("  {:24} Back to home", "home".yellow());
            }
            View::Collaboration => {
                println!("{}", "Collaboration commands:".bright_cyan());
                println!("  {:16} Show (or generate) the study plan", "plan".yellow());
                println!("  {:16} Generate a fresh practice problem", "problem".yellow());
                println!("  {:16} Reveal the problem's solution", "solution".yellow());
                println!("  {:16} Send a chat message", "say <text>".yellow());
                println!("  {:16} Show the chat transcript", "chat".yellow());
                println!("  {:16} Append to the shared notes", "note <text>".yellow());
                println!("  {:16} Show the shared notes", "notes".yellow());
                println!("  {:16} Back to the match list", "back".yellow());
            }
        }
        println!("  {:12} Show this help", "help".yellow());
        println!("  {:12} Exit", "quit".yellow());
        println!();
    }

    async fn dispatch_login(&mut self, rl: &mut DefaultEditor, cmd: &str) -> Result<()> {
        match cmd {
            "login" => {
                let email = rl.readline("email: ")?;
                let password = rl.readline("password: ")?;
                let outcome = self.auth.login(email.trim(), password.trim()).await?;
                println!("{}", outcome.message);
                if let Some(user) = outcome.user {
                    self.state.sign_in(user);
                    println!("Welcome back, {}!", self.state.display_name().bright_white());
                }
            }
            "signup" => {
                let name = rl.readline("name: ")?;
                let email = rl.readline("email: ")?;
                let password = rl.readline("password: ")?;
                let outcome = self.auth.sign_up(name.trim(), email.trim(), password.trim()).await?;
                println!("{}", outcome.message);
                if let Some(user) = outcome.user {
                    self.state.sign_in(user);
                }
            }
            _ => self.unknown(cmd),
        }
        Ok(())
    }

    async fn dispatch_home(&mut self, cmd: &str) -> Result<()> {
        match cmd {
            "profile" => {
                self.state.open_profile_form();
                self.print_form();
            }
            "logout" => {
                self.poller = None;
                self.state.logout();
                println!("Signed out.");
            }
            _ => self.unknown(cmd),
        }
        Ok(())
    }

    async fn dispatch_profile(&mut self, cmd: &str, rest: &str) -> Result<()> {
        match cmd {
            "name" => {
                self.state.draft.name = rest.to_string();
            }
            "offer" => Self::toggle_option(&mut self.state.draft.subjects_can_help, &SUBJECTS, rest),
            "need" => Self::toggle_option(&mut self.state.draft.subjects_help_needed, &SUBJECTS, rest),
            "avail" => Self::toggle_option(&mut self.state.draft.availability, &AVAILABILITY_OPTIONS, rest),
            "method" => {
                if let Some(value) = Self::pick_option(&STUDY_METHODS, rest) {
                    self.state.draft.study_method = value;
                } else {
                    println!("Pick a number from 1 to {}", STUDY_METHODS.len());
                }
            }
            "show" => self.print_form(),
            "find" => {
                println!("{}", "Finding your study partners...".dimmed());
                if let Err(e) = self.controller.submit_profile(&mut self.state).await {
                    println!("{} {}", "!".red(), e.to_string().red());
                    return Ok(());
                }
                if self.state.view == View::Matches {
                    self.filter = MatchFilter::All;
                    self.poller = Some(self.controller.spawn_preview_poller(self.preview_interval));
                    self.print_matches();
                }
            }
            "home" => {
                self.state.go_home();
            }
            _ => self.unknown(cmd),
        }
        Ok(())
    }

    async fn dispatch_matches(&mut self, cmd: &str, rest: &str) -> Result<()> {
        match cmd {
            "list" => self.print_matches(),
            "filter" => {
                match rest {
                    "all" => self.filter = MatchFilter::All,
                    "friends" => self.filter = MatchFilter::Friends,
                    "individuals" => self.filter = MatchFilter::Individuals,
                    "pairs" => self.filter = MatchFilter::Pairs,
                    "groups" => self.filter = MatchFilter::LargerGroups,
                    _ => {
                        println!("Filters: all, friends, individuals, pairs, groups");
                        return Ok(());
                    }
                }
                self.print_matches();
            }
            "previews" => self.print_previews(),
            "study" => {
                let Some(index) = rest.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) else {
                    println!("Usage: study <number from the list>");
                    return Ok(());
                };
                let Some(original) = self.filtered_indices().get(index).copied() else {
                    println!("No match with that number.");
                    return Ok(());
                };
                self.poller = None;
                if let Some(session) = self.state.select_match(original) {
                    println!(
                        "Studying {} with {}",
                        session.subject.bright_white(),
                        session.participants().join(", ").bright_white()
                    );
                    println!("Type {} to generate a study plan.", "plan".yellow());
                }
            }
            "profile" => {
                self.poller = None;
                self.state.open_profile_form();
                self.print_form();
            }
            "home" => {
                self.poller = None;
                self.state.go_home();
            }
            _ => self.unknown(cmd),
        }
        Ok(())
    }

    async fn dispatch_collaboration(&mut self, cmd: &str, rest: &str) -> Result<()> {
        match cmd {
            "plan" => {
                if self.state.session.as_ref().is_some_and(|s| s.plan.is_none()) {
                    println!("{}", "Generating your study plan...".dimmed());
                    self.controller.load_study_plan(&mut self.state).await;
                }
                self.print_plan();
            }
            "problem" => {
                if self.state.session.as_ref().is_some_and(|s| s.plan.is_none()) {
                    println!("Generate a plan first with {}.", "plan".yellow());
                    return Ok(());
                }
                println!("{}", "Generating a new problem...".dimmed());
                self.controller.new_practice_problem(&mut self.state).await;
                self.print_plan();
            }
            "solution" => {
                match self.state.session.as_ref().and_then(|s| s.plan.as_ref()) {
                    Some(plan) => println!("{} {}", "Solution:".bright_cyan(), plan.practice_problem.solution),
                    None => println!("No practice problem yet. Try {} first.", "plan".yellow()),
                }
            }
            "say" => {
                if rest.is_empty() {
                    println!("Usage: say <message>");
                    return Ok(());
                }
                if !self.controller.send_chat_message(&mut self.state, rest).await {
                    println!("{}", "Hold on, a reply is still coming.".dimmed());
                    return Ok(());
                }
                // Show the tail of the conversation
                if let Some(session) = &self.state.session
                    && let Some(reply) = session.transcript.last()
                {
                    println!("{} {}", format!("{}:", reply.sender).bright_blue(), reply.text);
                }
            }
            "chat" => self.print_transcript(),
            "note" => {
                if let Some(session) = self.state.session.as_mut() {
                    session.whiteboard.notes.push_str(rest);
                    session.whiteboard.notes.push('\n');
                }
            }
            "notes" => {
                if let Some(session) = &self.state.session {
                    println!("{}", session.whiteboard.notes);
                }
            }
            "back" => {
                self.state.return_to_matches();
                self.poller = Some(self.controller.spawn_preview_poller(self.preview_interval));
                self.print_matches();
            }
            _ => self.unknown(cmd),
        }
        Ok(())
    }

    fn unknown(&self, cmd: &str) {
        println!("{} Unknown command: {}", "?".yellow(), cmd);
        println!("Type {} for available commands", "help".yellow());
    }

    /// Toggle a numbered option in a multi-select list
    fn toggle_option(list: &mut Vec<String>, options: &[&str], arg: &str) {
        match Self::pick_option(options, arg) {
            Some(value) => {
                ProfileDraft::toggle(list, &value);
                println!("Selected: {}", list.join(", "));
            }
            None => println!("Pick a number from 1 to {}", options.len()),
        }
    }

    fn pick_option(options: &[&str], arg: &str) -> Option<String> {
        arg.parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| options.get(i))
            .map(|s| s.to_string())
    }

    fn print_form(&self) {
        let draft = &self.state.draft;
        println!();
        println!("{}", "Your study profile".bright_cyan());
        println!("  Name: {}", if draft.name.is_empty() { "(unset)" } else { &draft.name });
        println!("  Can help with: {}", draft.subjects_can_help.join(", "));
        println!("  Needs help with: {}", draft.subjects_help_needed.join(", "));
        println!("  Availability: {}", draft.availability.join(", "));
        println!("  Study method: {}", draft.study_method);
        println!();
        println!("{}", "Subjects (offer <n> / need <n>):".bright_cyan());
        for (i, s) in SUBJECTS.iter().enumerate() {
            println!("  {:2}. {}", i + 1, s);
        }
        println!("{}", "Availability (avail <n>):".bright_cyan());
        for (i, s) in AVAILABILITY_OPTIONS.iter().enumerate() {
            println!("  {:2}. {}", i + 1, s);
        }
        println!("{}", "Study methods (method <n>):".bright_cyan());
        for (i, s) in STUDY_METHODS.iter().enumerate() {
            println!("  {:2}. {}", i + 1, s);
        }
        println!();
    }

    /// Indices into the unfiltered match list in display order
    fn filtered_indices(&self) -> Vec<usize> {
        self.state
            .matches
            .iter()
            .enumerate()
            .filter(|(_, m)| self.filter.matches(m))
            .map(|(i, _)| i)
            .collect()
    }

    fn print_matches(&self) {
        let indices = self.filtered_indices();
        println!();
        if indices.is_empty() {
            println!("{}", "No matches under this filter.".dimmed());
            return;
        }
        for (display, &original) in indices.iter().enumerate() {
            let m = &self.state.matches[original];
            let kind = match m {
                Match::Student(s) if s.profile.is_friend => "friend".bright_magenta(),
                Match::Student(_) => "partner".bright_blue(),
                Match::Group(g) => format!("group, {} seat(s) open", g.open_seats()).bright_yellow(),
            };
            println!("  {}. {} ({})", display + 1, m.display_name().bright_white(), kind);
            println!("     {}", m.rationale().dimmed());
        }
        println!();
        println!("Type {} to start studying.", "study <n>".yellow());
    }

    fn print_previews(&self) {
        let Some(poller) = &self.poller else {
            println!("{}", "No live previews available.".dimmed());
            return;
        };
        let previews = poller.latest();
        if previews.is_empty() {
            println!("{}", "Previews are still loading...".dimmed());
            return;
        }
        for m in &self.state.matches {
            if let Match::Group(g) = m
                && let Some(line) = previews.get(&g.id)
            {
                println!("  {}: {}", g.name.bright_white(), line.italic());
            }
        }
    }

    fn print_plan(&self) {
        let Some(plan) = self.state.session.as_ref().and_then(|s| s.plan.as_ref()) else {
            return;
        };
        println!();
        println!("{}", "Key topics".bright_cyan());
        for topic in &plan.key_topics {
            println!("  - {}", topic);
        }
        println!("{}", "Discussion questions".bright_cyan());
        for q in &plan.discussion_questions {
            println!("  - {}", q);
        }
        println!("{}", "Practice problem".bright_cyan());
        println!("  {}", plan.practice_problem.problem);
        println!("  ({} reveals the answer)", "solution".yellow());
        println!();
    }

    fn print_transcript(&self) {
        let Some(session) = &self.state.session else {
            return;
        };
        if session.transcript.is_empty() {
            println!("{}", "No messages yet. Say hello!".dimmed());
            return;
        }
        for msg in &session.transcript {
            let sender = if msg.sender == self.state.display_name() {
                msg.sender.bright_green()
            } else {
                msg.sender.bright_blue()
            };
            println!("  [{}] {}: {}", msg.timestamp.dimmed(), sender, msg.text);
        }
    }
}
