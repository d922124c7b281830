use std::path::PathBuf;

pub enum Command {
    // Browsing
    List {
        category: Option<String>,
    },
    Show {
        id: usize,
    },
    Categories,
    Search {
        term: String,
    },
    // Files
    Export {
        file: PathBuf,
        format: Option<String>,
        category: Option<String>,
    },
    Validate {
        file: PathBuf,
    },
}

impl Command {
    /// Name used in the audit log.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Command::List { .. } => "list",
            Command::Show { .. } => "show",
            Command::Categories => "categories",
            Command::Search { .. } => "search",
            Command::Export { .. } => "export",
            Command::Validate { .. } => "validate",
        }
    }
}
