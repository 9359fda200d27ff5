//! External collaborators: the spreadsheet feed.

pub mod feed {
    pub use crate::feed::*;
}
