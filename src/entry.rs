//! An entry detail together with the addenda records that follow it.

use crate::records::{Addenda, Addenda02, Addenda05, Addenda98, Addenda99, EntryDetail};
use serde::Serialize;
use std::fmt;

/// What kind of entry an [`Entry`] is, derived from its addenda.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntryCategory {
    /// An original payment instruction.
    Forward,
    /// Sends a received entry back, carries an Addenda99.
    Return,
    /// Notification of change, carries an Addenda98.
    NotificationOfChange,
}

impl fmt::Display for EntryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryCategory::Forward => "Forward",
            EntryCategory::Return => "Return",
            EntryCategory::NotificationOfChange => "NOC",
        };
        f.write_str(name)
    }
}

/// One entry detail and its addenda, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub detail: EntryDetail,
    pub addenda: Vec<Addenda>,
}

impl Entry {
    pub fn new(detail: EntryDetail) -> Self {
        Entry {
            detail,
            addenda: Vec::new(),
        }
    }

    pub fn with_addenda(mut self, addenda: impl Into<Addenda>) -> Self {
        self.add_addenda(addenda);
        self
    }

    /// Appends an addenda. The addenda record indicator is set by `Batch::create`.
    pub fn add_addenda(&mut self, addenda: impl Into<Addenda>) {
        self.addenda.push(addenda.into());
    }

    pub fn category(&self) -> EntryCategory {
        if self.addenda99().is_some() {
            EntryCategory::Return
        } else if self.addenda98().is_some() {
            EntryCategory::NotificationOfChange
        } else {
            EntryCategory::Forward
        }
    }

    pub fn addenda02(&self) -> impl Iterator<Item = &Addenda02> {
        self.addenda.iter().filter_map(|a| match a {
            Addenda::Terminal(a) => Some(a),
            _ => None,
        })
    }

    pub fn addenda05(&self) -> impl Iterator<Item = &Addenda05> {
        self.addenda.iter().filter_map(|a| match a {
            Addenda::PaymentInfo(a) => Some(a),
            _ => None,
        })
    }

    pub fn addenda98(&self) -> Option<&Addenda98> {
        self.addenda.iter().find_map(|a| match a {
            Addenda::NoticeOfChange(a) => Some(a),
            _ => None,
        })
    }

    pub fn addenda99(&self) -> Option<&Addenda99> {
        self.addenda.iter().find_map(|a| match a {
            Addenda::Return(a) => Some(a),
            _ => None,
        })
    }

    /// Count of `type_code` addenda attached to this entry.
    pub fn count_of(&self, type_code: &str) -> usize {
        self.addenda.iter().filter(|a| a.type_code() == type_code).count()
    }

    /// Lines this entry occupies in a file: the detail plus each addenda.
    pub fn line_count(&self) -> usize {
        1 + self.addenda.len()
    }

    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        std::iter::once(self.detail.to_string()).chain(self.addenda.iter().map(|a| a.to_string()))
    }
}

impl From<EntryDetail> for Entry {
    fn from(detail: EntryDetail) -> Self {
        Entry::new(detail)
    }
}
