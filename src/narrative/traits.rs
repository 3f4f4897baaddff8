//! # Narrator Traits
//!
//! The seam behind which a concrete text-generation client lives.

use super::{NarrativeContext, NarrativeRequest};
use crate::RogulatorResult;

/// Produces flavor text for narrative requests.
///
/// `Ok(None)` means "nothing to add". Errors are logged by the caller and
/// never affect gameplay.
pub trait Narrator {
    fn narrate(
        &mut self,
        request: &NarrativeRequest,
        context: &NarrativeContext,
    ) -> RogulatorResult<Option<String>>;
}

/// Narrator that never says anything. The default for every session.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNarrator;

impl Narrator for SilentNarrator {
    fn narrate(
        &mut self,
        _request: &NarrativeRequest,
        _context: &NarrativeContext,
    ) -> RogulatorResult<Option<String>> {
        Ok(None)
    }
}

/// Any matching closure is a narrator.
impl<F> Narrator for F
where
    F: FnMut(&NarrativeRequest, &NarrativeContext) -> RogulatorResult<Option<String>>,
{
    fn narrate(
        &mut self,
        request: &NarrativeRequest,
        context: &NarrativeContext,
    ) -> RogulatorResult<Option<String>> {
        self(request, context)
    }
}
