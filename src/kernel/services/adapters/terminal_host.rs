use compact_str::CompactString;

use crate::kernel::services::ports::{ElementRef, Host};
use crate::kernel::Geometry;

const FALLBACK_VIEWPORT: Geometry = Geometry::new(80, 24);

/// Host backed by the controlling terminal. The viewport is the terminal size
/// in cells; elements are a fixed list of names.
pub struct TerminalHost {
    elements: Vec<CompactString>,
}

impl TerminalHost {
    pub fn new<I, S>(elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CompactString>,
    {
        Self {
            elements: elements.into_iter().map(Into::into).collect(),
        }
    }
}

impl Host for TerminalHost {
    fn viewport(&self) -> Geometry {
        match crossterm::terminal::size() {
            Ok((cols, rows)) => Geometry::new(u32::from(cols), u32::from(rows)),
            Err(e) => {
                tracing::warn!(error = %e, "terminal size unavailable, using 80x24");
                FALLBACK_VIEWPORT
            }
        }
    }

    fn element(&self, id: &str) -> Option<ElementRef> {
        self.elements
            .iter()
            .find(|known| known.as_str() == id)
            .map(|known| ElementRef::new(known.clone()))
    }
}
