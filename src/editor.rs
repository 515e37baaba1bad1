//! Editor-side operations: listing restriction choices and saving a selection.

use tracing::{debug, info, warn};

use crate::engine::ContentGate;
use crate::error::GateError;
use crate::store::resolve_restriction;
use crate::types::{
    ANY_GROUP_TOKEN, Authenticity, ContentId, RestrictionChoice, RestrictionEntry,
    RestrictionSet, SaveOutcome,
};

impl ContentGate {
    /// Options for a restriction editor, with the current selection checked.
    ///
    /// The wildcard option comes first, followed by every known group in the
    /// provider's order. With no known groups the list is empty.
    ///
    /// Groups whose id could not be saved back (the reserved wildcard token,
    /// or ids that fail [`crate::GroupId::is_restrictable`]) are left out, so every
    /// offered value is accepted by [`ContentGate::save_restrictions`].
    pub fn restriction_choices(
        &self,
        content: &ContentId,
    ) -> Result<Vec<RestrictionChoice>, GateError> {
        let groups: Vec<_> = self
            .membership
            .all_groups()?
            .into_iter()
            .filter(|group| {
                let keep = group.id.is_restrictable();
                if !keep {
                    warn!(
                        event = "Editor",
                        phase = "Choices",
                        group = group.id.as_str(),
                        "skipping group whose id cannot be stored in a restriction"
                    );
                }
                keep
            })
            .collect();
        if groups.is_empty() {
            return Ok(Vec::new());
        }

        let current = resolve_restriction(self.store.as_ref(), content)?;

        let mut choices = Vec::with_capacity(groups.len() + 1);
        choices.push(RestrictionChoice {
            value: ANY_GROUP_TOKEN.to_string(),
            label: self.config.any_group_label.clone(),
            checked: current.contains_any_group(),
        });
        choices.extend(groups.into_iter().map(|group| RestrictionChoice {
            checked: current.contains(&RestrictionEntry::Group(group.id.clone())),
            value: group.id.to_string(),
            label: group.display_name,
        }));

        debug!(
            event = "Editor",
            phase = "Choices",
            content = content.to_string(),
            choices = choices.len()
        );

        Ok(choices)
    }

    /// Apply a submitted selection.
    ///
    /// Nothing is written unless `authenticity` is verified and every token
    /// parses. An empty selection removes the stored restriction.
    pub fn save_restrictions<I, S>(
        &self,
        content: &ContentId,
        submitted: I,
        authenticity: Authenticity,
    ) -> Result<SaveOutcome, GateError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if authenticity == Authenticity::Rejected {
            warn!(
                event = "Editor",
                phase = "Save",
                content = content.to_string(),
                "rejected restriction save without a valid authenticity token"
            );
            return Err(GateError::Authenticity(format!(
                "save for content '{content}' was not verified"
            )));
        }

        let restriction = RestrictionSet::parse_tokens(submitted)?;

        if restriction.is_empty() {
            self.store.delete(content)?;
            info!(
                event = "Editor",
                phase = "Save",
                content = content.to_string(),
                "restriction cleared"
            );
            return Ok(SaveOutcome::Cleared);
        }

        self.store.set(content, restriction.clone())?;
        info!(
            event = "Editor",
            phase = "Save",
            content = content.to_string(),
            restriction = restriction.to_string(),
            "restriction stored"
        );
        Ok(SaveOutcome::Stored(restriction))
    }
}
