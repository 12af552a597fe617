use std::fmt;

/// Which side of a fork the current process is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Parent,
    Child,
}

impl Role {
    /// Label printed in front of every line a context reports.
    pub fn label(self) -> &'static str {
        match self {
            Role::Parent => "Parent:",
            Role::Child => "Child:",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Parent => "parent",
            Role::Child => "child",
        })
    }
}
