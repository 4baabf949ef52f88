// src/renderers/contact.rs
use anyhow::Result;
use tracing::{info, warn};

use crate::document::{Document, Run};
use crate::environment::Identity;

/// `mailto:` target for an email address
pub fn mailto_target(email: &str) -> Option<String> {
    let email = email.trim();
    let (user, domain) = email.split_once('@')?;
    if user.is_empty() || !domain.contains('.') || email.chars().any(char::is_whitespace) {
        return None;
    }
    Some(format!("mailto:{}", email))
}

/// `tel:` target keeping only digits and a leading '+'
pub fn tel_target(phone: &str) -> Option<String> {
    let phone = phone.trim();
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 5 {
        return None;
    }
    let prefix = if phone.starts_with('+') { "+" } else { "" };
    Some(format!("tel:{}{}", prefix, digits))
}

/// Web target, inferring `https://` when no scheme is given
pub fn web_target(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() || url.chars().any(char::is_whitespace) || !url.contains('.') {
        return None;
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        Some(url.to_string())
    } else {
        Some(format!("https://{}", url))
    }
}

fn contact_line(doc: &mut Document, label: &str, value: &str, target: Option<String>) {
    let runs = match target {
        Some(target) => {
            let mut runs = Vec::new();
            if !label.is_empty() {
                runs.push(Run::plain(label));
            }
            runs.push(Run::linked(value, &target));
            runs
        }
        None => {
            warn!(
                "Could not build a link for '{}{}', rendering it as plain text",
                label, value
            );
            vec![Run::plain(&format!("{}{}", label, value))]
        }
    };
    doc.add_runs(runs).centered();
}

pub fn render(identity: &Identity, doc: &mut Document) -> Result<()> {
    if !identity.name.is_empty() {
        doc.add_heading(&identity.name, 1).centered();
    }

    if !identity.email.is_empty() {
        contact_line(doc, "", &identity.email, mailto_target(&identity.email));
    }
    if let Some(phone) = &identity.phone {
        contact_line(doc, "", phone, tel_target(phone));
    }
    if let Some(location) = &identity.location {
        doc.add_paragraph(location).centered();
    }
    if let Some(linkedin) = &identity.linkedin {
        contact_line(doc, "LinkedIn: ", linkedin, web_target(linkedin));
    }
    if let Some(github) = &identity.github {
        contact_line(doc, "GitHub: ", github, web_target(github));
    }
    if let Some(website) = &identity.website {
        contact_line(doc, "Website: ", website, web_target(website));
    }

    info!("Added contact information for: {}", identity.name);
    Ok(())
}
