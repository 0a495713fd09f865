//! Output format and profile selection.
//!
//! Each step filters the host catalog, shows the remaining entries in host
//! order with the first one pre-selected, and maps the confirmed display name
//! back onto the catalog. An empty filtered list is reported with a notice
//! and cancels the step without showing a prompt.

use super::NOTICE_TITLE;
use crate::config::ExportSettings;
use crate::error::Result;
use crate::host::{Presenter, RenderFormat, RenderProfile};

/// Why a selection step produced no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The user dismissed the prompt.
    Dismissed,
    /// Filtering left nothing to choose from.
    NoCandidates,
}

/// Outcome of a selection step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    Selected(T),
    Cancelled(CancelReason),
}

impl<T> Selection<T> {
    /// Returns the selected value, if any.
    pub fn selected(self) -> Option<T> {
        match self {
            Selection::Selected(value) => Some(value),
            Selection::Cancelled(_) => None,
        }
    }
}

/// Asks the user for an audio-capable render format.
///
/// Only formats whose name contains one of the configured audio keywords are
/// offered.
pub fn choose_format<P: Presenter>(
    presenter: &mut P,
    formats: &[RenderFormat],
    settings: &ExportSettings,
) -> Result<Selection<RenderFormat>> {
    let candidates: Vec<String> = formats
        .iter()
        .filter(|f| settings.is_audio_format_name(&f.name))
        .map(|f| f.name.clone())
        .collect();

    if candidates.is_empty() {
        tracing::info!("No audio formats among {} render formats", formats.len());
        presenter.notify(NOTICE_TITLE, "No audio formats found!")?;
        return Ok(Selection::Cancelled(CancelReason::NoCandidates));
    }

    let Some(chosen) = presenter.prompt_choice("Select Audio Format", &candidates)? else {
        return Ok(Selection::Cancelled(CancelReason::Dismissed));
    };

    // Names may repeat; the first match in host order wins.
    Ok(match formats.iter().find(|f| f.name == chosen) {
        Some(format) => Selection::Selected(format.clone()),
        None => Selection::Cancelled(CancelReason::Dismissed),
    })
}

/// Asks the user for a valid profile of `format`.
///
/// `profiles` is the host's full profile list for the format; invalid entries
/// are not offered.
pub fn choose_profile<P: Presenter>(
    presenter: &mut P,
    format: &RenderFormat,
    profiles: &[RenderProfile],
) -> Result<Selection<RenderProfile>> {
    let candidates: Vec<String> = profiles
        .iter()
        .filter(|p| p.is_valid())
        .map(|p| p.name.clone())
        .collect();

    if candidates.is_empty() {
        tracing::info!("No valid profiles for format '{}'", format.name);
        presenter.notify(
            NOTICE_TITLE,
            &format!("No valid profiles found for {}!", format.name),
        )?;
        return Ok(Selection::Cancelled(CancelReason::NoCandidates));
    }

    let title = format!("Select Output Profile for {}", format.name);
    let Some(chosen) = presenter.prompt_choice(&title, &candidates)? else {
        return Ok(Selection::Cancelled(CancelReason::Dismissed));
    };

    // The lookup runs over every profile, valid or not, first match wins.
    Ok(match profiles.iter().find(|p| p.name == chosen) {
        Some(profile) => Selection::Selected(profile.clone()),
        None => Selection::Cancelled(CancelReason::Dismissed),
    })
}
