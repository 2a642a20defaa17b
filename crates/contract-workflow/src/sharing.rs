//! Collaborators on a generated contract

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::{Collaborator, GeneratedContract, Role};

use crate::error::WorkflowError;

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

/// Invite `email` with `role`. Emails are unique per contract, ignoring case.
pub fn add_collaborator(
    contract: &mut GeneratedContract,
    email: &str,
    role: Role,
) -> Result<Collaborator, WorkflowError> {
    let email = email.trim();
    if !EMAIL.is_match(email) {
        return Err(WorkflowError::InvalidEmail(email.to_string()));
    }
    if contract
        .collaborators
        .iter()
        .any(|c| c.email.eq_ignore_ascii_case(email))
    {
        return Err(WorkflowError::DuplicateCollaborator(email.to_string()));
    }

    let collaborator = Collaborator::new(email.to_lowercase(), role);
    contract.collaborators.push(collaborator.clone());
    tracing::debug!("Shared contract {} with {} as {:?}", contract.id, collaborator.email, role);
    Ok(collaborator)
}

pub fn change_role(contract: &mut GeneratedContract, collaborator_id: &str, role: Role) -> Result<(), WorkflowError> {
    let collaborator = contract
        .collaborators
        .iter_mut()
        .find(|c| c.id == collaborator_id)
        .ok_or_else(|| WorkflowError::CollaboratorNotFound(collaborator_id.to_string()))?;
    collaborator.set_role(role);
    Ok(())
}

pub fn remove_collaborator(contract: &mut GeneratedContract, collaborator_id: &str) -> Result<Collaborator, WorkflowError> {
    let index = contract
        .collaborators
        .iter()
        .position(|c| c.id == collaborator_id)
        .ok_or_else(|| WorkflowError::CollaboratorNotFound(collaborator_id.to_string()))?;
    Ok(contract.collaborators.remove(index))
}
