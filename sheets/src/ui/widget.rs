//! Per-column-type cell editors.
//!
//! A widget never talks to the server. It turns a user edit into a
//! [`Commit`], and the caller sends `Commit::Set` through the session.

use crate::column_type::ColumnType;
use crate::node::ColumnNode;

pub const TRUE: &str = "TRUE";
pub const FALSE: &str = "FALSE";

/// What to send to the cell upsert endpoint, if anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Commit {
    Set(Option<String>),
    Skip,
}

/// A single user interaction with a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit<'a> {
    /// Focus left a free-text input holding this buffer.
    Blur(&'a str),
    Toggle(bool),
    Pick(&'a str),
    Add(&'a str),
    Remove(&'a str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellWidget {
    Text(ColumnType),
    Checkbox,
    Select { options: Vec<String> },
    MultiSelect { options: Vec<String> },
}

/// Split a stored `options` string: comma separated, trimmed, blanks dropped.
pub fn split_options(raw: Option<&str>) -> Vec<String> {
    split_list(raw.unwrap_or_default())
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn join_list(values: &[String]) -> Option<String> {
    if values.is_empty() {
        None
    } else {
        Some(values.join(", "))
    }
}

fn buffer(text: &str) -> Commit {
    if text.is_empty() {
        Commit::Set(None)
    } else {
        Commit::Set(Some(text.to_string()))
    }
}

impl CellWidget {
    pub fn for_column(column: &ColumnNode) -> Self {
        let column_type = ColumnType::from_tag(&column.column_type);
        let options = split_options(column.options.as_deref());
        match column_type {
            ColumnType::Boolean => CellWidget::Checkbox,
            ColumnType::TextSelect => CellWidget::Select { options },
            ColumnType::TextMultiSelect => CellWidget::MultiSelect { options },
            other => CellWidget::Text(other),
        }
    }

    /// Select widgets without configured options edit as plain text.
    fn is_free_text(&self) -> bool {
        match self {
            CellWidget::Text(_) => true,
            CellWidget::Checkbox => false,
            CellWidget::Select { options } | CellWidget::MultiSelect { options } => {
                options.is_empty()
            }
        }
    }

    pub fn commit(&self, current: Option<&str>, edit: Edit<'_>) -> Commit {
        if let Edit::Blur(text) = edit {
            return if self.is_free_text() {
                buffer(text)
            } else {
                Commit::Skip
            };
        }

        match (self, edit) {
            (CellWidget::Checkbox, Edit::Toggle(on)) => {
                let literal = if on { TRUE } else { FALSE };
                Commit::Set(Some(literal.to_string()))
            }
            (CellWidget::Select { options }, Edit::Pick(choice)) => {
                let choice = choice.trim();
                // A configured option wins over the "none" sentinel.
                if options.iter().any(|o| o == choice) {
                    Commit::Set(Some(choice.to_string()))
                } else if choice.is_empty() || choice.eq_ignore_ascii_case("none") {
                    Commit::Set(None)
                } else if options.is_empty() {
                    Commit::Set(Some(choice.to_string()))
                } else {
                    Commit::Skip
                }
            }
            (CellWidget::MultiSelect { options }, Edit::Add(choice)) => {
                let choice = choice.trim();
                let mut selected = split_list(current.unwrap_or_default());
                let allowed = options.is_empty() || options.iter().any(|o| o == choice);
                if choice.is_empty() || !allowed || selected.iter().any(|s| s == choice) {
                    return Commit::Skip;
                }
                selected.push(choice.to_string());
                Commit::Set(join_list(&selected))
            }
            (CellWidget::MultiSelect { .. }, Edit::Remove(choice)) => {
                let choice = choice.trim();
                let mut selected = split_list(current.unwrap_or_default());
                let before = selected.len();
                selected.retain(|s| s != choice);
                if selected.len() == before {
                    return Commit::Skip;
                }
                Commit::Set(join_list(&selected))
            }
            _ => Commit::Skip,
        }
    }

    /// Map one line of command-line input onto an [`Edit`] and commit it.
    ///
    /// Checkboxes take `true`/`false` (also `yes`/`no`, `1`/`0`, `x`).
    /// Multi-selects take `+Option` to add and `-Option` to remove.
    pub fn commit_input(&self, current: Option<&str>, input: &str) -> Commit {
        match self {
            CellWidget::Checkbox => match input.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" | "x" => self.commit(current, Edit::Toggle(true)),
                "false" | "no" | "0" | "" => self.commit(current, Edit::Toggle(false)),
                _ => Commit::Skip,
            },
            CellWidget::Select { options } if !options.is_empty() => {
                self.commit(current, Edit::Pick(input))
            }
            CellWidget::MultiSelect { options } if !options.is_empty() => {
                if let Some(add) = input.strip_prefix('+') {
                    self.commit(current, Edit::Add(add))
                } else if let Some(remove) = input.strip_prefix('-') {
                    self.commit(current, Edit::Remove(remove))
                } else {
                    Commit::Skip
                }
            }
            _ => self.commit(current, Edit::Blur(input)),
        }
    }

    /// Text shown in a grid cell.
    pub fn display(&self, value: Option<&str>) -> String {
        match self {
            CellWidget::Checkbox if value == Some(TRUE) => "[x]".to_string(),
            CellWidget::Checkbox => "[ ]".to_string(),
            _ => value.unwrap_or_default().replace('\n', " "),
        }
    }
}
