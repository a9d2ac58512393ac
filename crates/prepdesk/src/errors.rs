//! Actionable error formatting for improved user experience.
//!
//! Wraps an error message with possible causes and remediation steps so
//! CLI users can diagnose and fix problems without reading source code.

use std::fmt;

/// An error with diagnostic context and remediation steps.
///
/// # Example
///
/// ```
/// use prepdesk::errors::ActionableError;
///
/// let error = ActionableError::new("Material ab12 not found")
///     .with_cause("The material may have been deleted")
///     .with_remedy("List materials: prepdesk list --all");
///
/// eprintln!("{}", error);
/// ```
#[derive(Debug, Clone)]
pub struct ActionableError {
    /// The main error message
    error: String,
    /// Possible causes (diagnostic hints)
    causes: Vec<String>,
    /// Remediation steps (how to fix)
    remediation: Vec<String>,
}

impl ActionableError {
    /// Create a new actionable error with the given message.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            causes: Vec::new(),
            remediation: Vec::new(),
        }
    }

    /// Add a possible cause (diagnostic hint).
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.causes.push(cause.into());
        self
    }

    /// Add a remediation step (actionable fix).
    pub fn with_remedy(mut self, remedy: impl Into<String>) -> Self {
        self.remediation.push(remedy.into());
        self
    }

    /// Convert to a formatted error message suitable for display.
    pub fn to_error_message(&self) -> String {
        let mut msg = format!("Error: {}\n", self.error);

        if !self.causes.is_empty() {
            msg.push_str("\nPossible causes:\n");
            for cause in &self.causes {
                msg.push_str(&format!("  • {}\n", cause));
            }
        }

        if !self.remediation.is_empty() {
            msg.push_str("\nTo fix:\n");
            for remedy in &self.remediation {
                msg.push_str(&format!("  • {}\n", remedy));
            }
        }

        msg
    }
}

impl fmt::Display for ActionableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_error_message())
    }
}

impl std::error::Error for ActionableError {}

/// Helper to create material not found errors with standard remediation.
pub fn material_not_found(id: &str) -> ActionableError {
    ActionableError::new(format!("Material {} not found", id))
        .with_cause("The material may have been deleted")
        .with_cause("The id or prefix may be incorrect")
        .with_remedy("List all materials including hidden ones: prepdesk list --all")
        .with_remedy("Ids can be abbreviated to a unique prefix of at least 4 characters")
}

/// Helper to create unknown subject errors listing the catalog.
pub fn unknown_subject(subject: &str) -> ActionableError {
    let known: Vec<&str> = crate::subjects::catalog().iter().map(|s| s.id).collect();
    ActionableError::new(format!("Unknown subject: {}", subject))
        .with_cause("Materials must reference a subject from the catalog")
        .with_remedy(format!("Use one of: {}", known.join(", ")))
        .with_remedy("See the catalog: prepdesk subjects")
}

/// Helper to create authorization errors with standard remediation.
pub fn not_an_admin(actor: &str) -> ActionableError {
    ActionableError::new(format!("Account {} is not an administrator", actor))
        .with_cause("Admin accounts are listed in config.toml under [access]")
        .with_cause("The wrong account id may be configured")
        .with_remedy("Add the account to the admins list in the data directory's config.toml")
        .with_remedy("Pass the acting account with --actor or PREPDESK_ACTOR")
}
