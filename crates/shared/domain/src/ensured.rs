//! Outcome of an idempotent "get or create".

/// A record that was either found or just created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ensured<T> {
    pub record: T,
    pub created: bool,
}

impl<T> Ensured<T> {
    pub fn created(record: T) -> Self {
        Self {
            record,
            created: true,
        }
    }

    pub fn existing(record: T) -> Self {
        Self {
            record,
            created: false,
        }
    }

    /// Convert the record, keeping the created flag.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Ensured<U> {
        Ensured {
            record: f(self.record),
            created: self.created,
        }
    }

    pub fn into_record(self) -> T {
        self.record
    }
}

/// Global revision counter state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Revision {
    pub value: i64,
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
