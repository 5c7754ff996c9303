//! Interactive menu for roster.
//!
//! [`Menu`] owns the store, the in-memory roster and the terminal, shows the
//! numbered choices, and runs one operation per selection until the operator
//! picks exit. Every successful mutation rewrites the backing file before the
//! menu comes back.

mod prompt;
pub mod table;

use std::io::{BufRead, Write};

use tracing::info;

pub use prompt::{Prompter, EMPTY_INPUT_MESSAGE};

use crate::error::Result;
use crate::store::{Roster, Store};
use crate::student::{parse_age, Student, StudentUpdate, ValidationError};

/// Lines of the menu, printed before every selection.
const MENU_LINES: [&str; 7] = [
    "====== Student Information System ======",
    "1. Add new student",
    "2. View all students",
    "3. Update a student",
    "4. Delete a student",
    "5. Find by ID",
    "0. Exit",
];

const SELECT_PROMPT: &str = "Select a number: ";
const NOT_FOUND: &str = "Student not found.";
const INVALID_CHOICE: &str = "Invalid option. Choose 0-5.";
const FAREWELL: &str = "Thankyou,Come Again!";
const AGE_TOO_LARGE: &str = "Age is too large.";

/// A menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// `1`
    Add,
    /// `2`
    View,
    /// `3`
    Update,
    /// `4`
    Delete,
    /// `5`
    Find,
    /// `0`
    Exit,
}

impl Choice {
    /// Parse a menu selection. Anything but `0`..`5` is `None`.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Add),
            "2" => Some(Self::View),
            "3" => Some(Self::Update),
            "4" => Some(Self::Delete),
            "5" => Some(Self::Find),
            "0" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// What an operation ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A record was appended and saved.
    Added,
    /// Add was refused: the id is taken.
    Duplicate,
    /// View printed this many rows.
    Listed(usize),
    /// View found nothing to print.
    Empty,
    /// Find printed the matching record.
    Found(Student),
    /// No record has the requested id.
    NotFound,
    /// A record was changed and saved.
    Updated,
    /// A record was removed and saved.
    Deleted,
    /// Delete was not confirmed.
    Cancelled,
    /// The operator chose exit.
    Exited,
}

/// The interactive session.
#[derive(Debug)]
pub struct Menu<R, W> {
    store: Store,
    roster: Roster,
    prompter: Prompter<R, W>,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    /// Create a menu over an already loaded roster.
    #[must_use]
    pub fn new(store: Store, roster: Roster, input: R, output: W) -> Self {
        Self {
            store,
            roster,
            prompter: Prompter::new(input, output),
        }
    }

    /// Load the roster from `store` and create a menu over it.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be created or read.
    pub fn open(store: Store, input: R, output: W) -> Result<Self> {
        let roster = store.load()?;
        Ok(Self::new(store, roster, input, output))
    }

    /// The in-memory roster.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Give back the output sink.
    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    /// Loop over selections until the operator chooses exit.
    ///
    /// Invalid selections and invalid field input never end the loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be written, or if input
    /// runs out before exit is chosen.
    pub fn run(&mut self) -> Result<()> {
        loop {
            if self.step()? == Some(Outcome::Exited) {
                return Ok(());
            }
        }
    }

    /// Show the menu, read one selection and carry it out.
    ///
    /// Returns `None` when the selection was not a menu choice.
    ///
    /// # Errors
    ///
    /// See [`Menu::run`].
    pub fn step(&mut self) -> Result<Option<Outcome>> {
        self.show_menu()?;
        let answer = self.prompter.ask(SELECT_PROMPT)?;
        match Choice::parse(&answer) {
            Some(choice) => self.dispatch(choice).map(Some),
            None => {
                self.prompter.say(INVALID_CHOICE)?;
                self.prompter.blank()?;
                Ok(None)
            }
        }
    }

    /// Carry out one operation.
    ///
    /// # Errors
    ///
    /// See [`Menu::run`].
    pub fn dispatch(&mut self, choice: Choice) -> Result<Outcome> {
        match choice {
            Choice::Add => self.add(),
            Choice::View => self.view(),
            Choice::Update => self.update(),
            Choice::Delete => self.delete(),
            Choice::Find => self.find(),
            Choice::Exit => {
                self.prompter.say(FAREWELL)?;
                Ok(Outcome::Exited)
            }
        }
    }

    fn show_menu(&mut self) -> Result<()> {
        self.prompter.blank()?;
        for line in MENU_LINES {
            self.prompter.say(line)?;
        }
        self.prompter.blank()
    }

    fn banner(&mut self, title: &str) -> Result<()> {
        self.prompter.blank()?;
        self.prompter.say(&format!("-- {title} --"))
    }

    /// Add a student. The id is checked for uniqueness before the other
    /// fields are asked for.
    ///
    /// # Errors
    ///
    /// See [`Menu::run`].
    pub fn add(&mut self) -> Result<Outcome> {
        self.banner("Add new student")?;
        let id = self.prompter.ask_nonempty("ID: ")?;
        if self.roster.contains_id(&id) {
            self.prompter
                .say(&format!("Student with ID '{id}' already exists."))?;
            return Ok(Outcome::Duplicate);
        }

        let first = self.prompter.ask_nonempty("First name: ")?;
        let last = self.prompter.ask_nonempty("Last name: ")?;
        let age = self.prompter.ask_until("Age: ", parse_age, |err| match err {
            ValidationError::Empty => "Age cannot be empty.",
            ValidationError::NotAnInteger => "Please enter a valid integer for age.",
            ValidationError::NotPositive => "Age must be positive.",
            ValidationError::TooLarge => AGE_TOO_LARGE,
        })?;

        if let Err(dup) = self.roster.add(Student::new(id.clone(), first, last, age)) {
            self.prompter.say(&dup.to_string())?;
            return Ok(Outcome::Duplicate);
        }
        self.store.save(&self.roster)?;
        info!("Added student {id}");

        self.prompter.say("Student added.")?;
        self.prompter.blank()?;
        Ok(Outcome::Added)
    }

    /// Print every student as a table.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn view(&mut self) -> Result<Outcome> {
        self.banner("All students")?;
        if self.roster.is_empty() {
            self.prompter.say("No students found.")?;
            return Ok(Outcome::Empty);
        }

        let rendered = table::render(self.roster.students());
        self.prompter.say(rendered.trim_end_matches('\n'))?;
        self.prompter.blank()?;
        Ok(Outcome::Listed(self.roster.len()))
    }

    /// Print the student with the requested id. Read-only.
    ///
    /// # Errors
    ///
    /// See [`Menu::run`].
    pub fn find(&mut self) -> Result<Outcome> {
        self.banner("Find by ID")?;
        let id = self.prompter.ask_nonempty("ID: ")?;
        let Some(student) = self.roster.find(&id).cloned() else {
            self.prompter.say(NOT_FOUND)?;
            return Ok(Outcome::NotFound);
        };

        self.prompter.say("Found:")?;
        self.prompter.say(&student.to_pretty_json()?)?;
        Ok(Outcome::Found(student))
    }

    /// Change first name, last name and age of one student. A blank answer
    /// keeps the current value; the id never changes.
    ///
    /// # Errors
    ///
    /// See [`Menu::run`].
    pub fn update(&mut self) -> Result<Outcome> {
        self.banner("Update a student")?;
        let id = self.prompter.ask_nonempty("ID of student to update: ")?;
        let Some(current) = self.roster.find(&id).cloned() else {
            self.prompter.say(NOT_FOUND)?;
            return Ok(Outcome::NotFound);
        };

        self.prompter.say("Leave blank to keep current value.")?;
        let first = self
            .prompter
            .ask(&format!("First name [{}]: ", current.first))?;
        let last = self
            .prompter
            .ask(&format!("Last name [{}]: ", current.last))?;
        let age = self.prompter.ask_until(
            &format!("Age [{}]: ", current.age),
            parse_optional_age,
            |err| match err {
                ValidationError::NotPositive => "Age must be positive.",
                ValidationError::TooLarge => AGE_TOO_LARGE,
                ValidationError::Empty | ValidationError::NotAnInteger => {
                    "Please enter a valid integer."
                }
            },
        )?;

        let update = StudentUpdate {
            first: non_blank(first),
            last: non_blank(last),
            age,
        };
        if let Some(student) = self.roster.find_mut(&id) {
            student.apply(update);
        }
        self.store.save(&self.roster)?;
        info!("Updated student {id}");

        self.prompter.say("Student updated.")?;
        Ok(Outcome::Updated)
    }

    /// Remove one student after a `y` confirmation.
    ///
    /// # Errors
    ///
    /// See [`Menu::run`].
    pub fn delete(&mut self) -> Result<Outcome> {
        self.banner("Delete a student")?;
        let id = self.prompter.ask_nonempty("ID to delete: ")?;
        let Some(target) = self.roster.find(&id) else {
            self.prompter.say(NOT_FOUND)?;
            return Ok(Outcome::NotFound);
        };

        let prompt = format!("Confirm delete {} {} (y/N): ", target.first, target.last);
        let answer = self.prompter.ask(&prompt)?;
        if !answer.eq_ignore_ascii_case("y") {
            self.prompter.say("Delete cancelled.")?;
            return Ok(Outcome::Cancelled);
        }

        self.roster.remove(&id);
        self.store.save(&self.roster)?;
        info!("Deleted student {id}");

        self.prompter.say("Student deleted.")?;
        Ok(Outcome::Deleted)
    }
}

/// Blank keeps the current age; anything else must be a positive integer.
fn parse_optional_age(input: &str) -> std::result::Result<Option<i64>, ValidationError> {
    if input.trim().is_empty() {
        Ok(None)
    } else {
        parse_age(input).map(Some)
    }
}

fn non_blank(answer: String) -> Option<String> {
    if answer.is_empty() {
        None
    } else {
        Some(answer)
    }
}
