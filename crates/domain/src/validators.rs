use crate::DomainError;

pub fn require_non_empty(value: &str, argument: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::InvalidArgument(format!(
            "{argument} cannot be empty"
        )));
    }
    Ok(())
}

/// Loose hostname check used before building a query.
///
/// Macro-bearing SPF arguments (`%{i}._spf.example.com`) never reach the
/// resolver, so plain label syntax is enough here.
pub fn validate_domain_name(name: &str) -> Result<(), DomainError> {
    require_non_empty(name, "Domain")?;

    let trimmed = name.trim_end_matches('.');
    if trimmed.len() > 253 {
        return Err(DomainError::InvalidDomainName(format!(
            "'{name}' exceeds 253 characters"
        )));
    }

    for label in trimmed.split('.') {
        if label.is_empty() || label.len() > 63 {
            return Err(DomainError::InvalidDomainName(format!(
                "'{name}' has an empty or oversized label"
            )));
        }
        if !label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(DomainError::InvalidDomainName(format!(
                "'{name}' contains invalid characters"
            )));
        }
    }

    Ok(())
}
