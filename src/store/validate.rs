//! Caller-facing validation, separate from the store.
//!
//! These checks gate user input before a command is ever built; the store
//! itself stays total over well-formed input.

use crate::error::{Result, WorkflowError};

/// A project needs a non-blank name.
pub fn validate_project_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        Err(WorkflowError::validation("Project name cannot be empty"))
    } else {
        Ok(())
    }
}

/// Creating a project requires at least one uploaded document.
pub fn validate_project_creation(name: &str, document_count: usize) -> Result<()> {
    validate_project_name(name)?;
    if document_count == 0 {
        Err(WorkflowError::validation(
            "Cannot create a project without documents",
        ))
    } else {
        Ok(())
    }
}

/// A figure needs a non-blank title before it can be saved.
pub fn validate_figure_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        Err(WorkflowError::validation("Figure title cannot be empty"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_project_name_rejected() {
        assert!(validate_project_name("").is_err());
        assert!(validate_project_name("   ").is_err());
        assert!(validate_project_name("Report Q3").is_ok());
    }

    #[test]
    fn test_project_creation_requires_documents() {
        assert!(validate_project_creation("p", 0).is_err());
        assert!(validate_project_creation("p", 1).is_ok());
    }

    #[test]
    fn test_blank_figure_title_rejected() {
        assert!(validate_figure_title(" ").is_err());
        assert!(validate_figure_title("Figure 1").is_ok());
    }
}
