//! Host Editor Collaborator
//!
//! The only piece of editor state the assigner touches is its cache of
//! syntax definitions.

/// Editor hosting the syntax definitions
pub trait SyntaxHost {
    /// Drop cached syntax definitions so the next highlight picks up changes
    fn reload(&self);
}

impl<H: SyntaxHost + ?Sized> SyntaxHost for &H {
    fn reload(&self) {
        (**self).reload()
    }
}

/// Host used by the command-line tool
///
/// The editor watches its `Packages` directory and reloads changed syntax
/// files on its own, so all that is left to do is say so.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogHost;

impl SyntaxHost for LogHost {
    fn reload(&self) {
        log::info!("Syntax definitions changed; the editor reloads them on its next index pass");
    }
}
