use std::process::ExitCode;
use std::sync::Arc;

use warp_log::{Console, Logger, Tag};
use warp_style::AnsiFore;

use crate::summary::Summary;

/// A suite function, as collected by [`Registry::add_collection`].
pub type SuiteFn = fn() -> Summary;

/// Top of the harness: runs named collections of suites and keeps the
/// overall count.
///
/// ```rust,no_run
/// use warp_test::{Registry, Suite, Summary};
///
/// fn math() -> Summary {
///     let mut suite = Suite::new("math");
///     suite.check_eq(2 + 2, 4, "addition");
///     suite.finish()
/// }
///
/// fn main() -> std::process::ExitCode {
///     Registry::new().add_collection("core", [math as fn() -> Summary]).conclude()
/// }
/// ```
#[derive(Debug)]
pub struct Registry {
    summary: Summary,
    logger: Logger,
    collections: Logger,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// A registry on the global console; logs the `[REGISTRY]` header.
    pub fn new() -> Self {
        Self::with_console(Console::global())
    }

    pub fn with_console(console: Arc<Console>) -> Self {
        let logger = Logger::new(Tag::colored(AnsiFore::Blue, "[REGISTRY]"))
            .with_console(Arc::clone(&console));
        let collections = Logger::from_tags(vec![
            Tag::plain("\t"),
            Tag::colored(AnsiFore::Blue, "[COLLECTION]"),
        ])
        .with_console(Arc::clone(&console));

        console.print_line("", logger.context());
        Self {
            summary: Summary::new(),
            logger,
            collections,
        }
    }

    /// Runs every suite of a collection and adds its result to the total.
    pub fn add_collection<I, F>(&mut self, name: &str, suites: I) -> &mut Self
    where
        I: IntoIterator<Item = F>,
        F: FnOnce() -> Summary,
    {
        self.collections.print(name);
        let collection: Summary = suites.into_iter().map(|suite| suite()).sum();

        let colors = self.collections.console().colors();
        self.collections.print(collection.render(colors));
        tracing::debug!(
            collection = name,
            passed = collection.passed(),
            total = collection.total(),
            "collection finished"
        );

        self.summary += collection;
        self
    }

    /// Adds a summary computed elsewhere (without logging a collection).
    pub fn record(&mut self, summary: Summary) -> &mut Self {
        self.summary += summary;
        self
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// 0 when nothing failed, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        u8::from(!self.summary.all_passed())
    }

    /// Process exit status for the run.
    pub fn conclude(&self) -> ExitCode {
        ExitCode::from(self.exit_code())
    }
}

impl Drop for Registry {
    fn drop(&mut self) {
        let colors = self.logger.console().colors();
        self.logger.print(self.summary.render(colors));
    }
}
