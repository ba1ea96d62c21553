use crate::level::MiniLevel;
use crate::sink::Mini;

/// Logs a trace line when created and another when dropped.
///
/// Usually created through [`wtrace!`](crate::wtrace).
#[derive(Debug)]
pub struct ScopeTracer<'m> {
    name: String,
    mini: &'m Mini,
}

impl ScopeTracer<'static> {
    pub fn new(name: impl Into<String>) -> Self {
        Self::on(Mini::global(), name)
    }
}

impl<'m> ScopeTracer<'m> {
    /// A tracer writing through `mini`.
    pub fn on(mini: &'m Mini, name: impl Into<String>) -> Self {
        let tracer = Self {
            name: name.into(),
            mini,
        };
        tracer.mark(true);
        tracer
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn mark(&self, enter: bool) {
        if !self.mini.enabled(MiniLevel::Trace) {
            return;
        }
        let marker = self.mini.scope_marker(enter);
        self.mini
            .write(MiniLevel::Trace, format_args!("{marker} : {}", self.name));
    }
}

impl Drop for ScopeTracer<'_> {
    fn drop(&mut self) {
        self.mark(false);
    }
}

/// Last path segment of a function's type name, without closure suffixes.
#[doc(hidden)]
pub fn trim_function_path(type_name: &str) -> &str {
    let mut path = type_name.strip_suffix("::__f").unwrap_or(type_name);
    while let Some(stripped) = path.strip_suffix("::{{closure}}") {
        path = stripped;
    }
    path.rsplit("::").next().unwrap_or(path)
}

/// Name of the enclosing function.
#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn __f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::tracer::trim_function_path(type_name_of(__f))
    }};
}

/// Traces entry and exit of the enclosing function.
///
/// `wtrace!()` names the scope `function()`, `wtrace!(Type)` names it
/// `Type::function()`.
///
/// ```rust
/// fn load() {
///     warp_mini::wtrace!();
///     // ...
/// }
/// load();
/// ```
#[macro_export]
macro_rules! wtrace {
    () => {
        let _scope_tracer =
            $crate::ScopeTracer::new(::std::format!("{}()", $crate::__function_name!()));
    };
    ($ty:ident) => {
        let _scope_tracer = $crate::ScopeTracer::new(::std::format!(
            "{}::{}()",
            ::std::stringify!($ty),
            $crate::__function_name!()
        ));
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MiniConfig;
    use warp_log::Console;

    #[test]
    fn trims_paths() {
        assert_eq!(trim_function_path("app::io::load::__f"), "load");
        assert_eq!(trim_function_path("app::run::{{closure}}::__f"), "run");
        assert_eq!(trim_function_path("main"), "main");
    }

    #[test]
    fn function_name_macro() {
        fn outer() -> &'static str {
            crate::__function_name!()
        }
        assert_eq!(outer(), "outer");
    }

    #[test]
    fn enter_and_leave() {
        let (console, capture) = Console::capture();
        let mini = Mini::new(MiniConfig::default().min_level(MiniLevel::Trace), console);
        {
            let tracer = ScopeTracer::on(&mini, "work()");
            assert_eq!(tracer.name(), "work()");
        }
        assert_eq!(
            capture.stdout_lines(),
            vec!["[TRACE] : --{ : work()", "[TRACE] : }-- : work()"]
        );
    }

    #[test]
    fn silent_above_trace() {
        let (console, capture) = Console::capture();
        let mini = Mini::new(MiniConfig::default().min_level(MiniLevel::Info), console);
        drop(ScopeTracer::on(&mini, "quiet()"));
        assert!(capture.stdout().is_empty());
    }

    #[test]
    fn custom_markers() {
        let (console, capture) = Console::capture();
        let config = MiniConfig::default()
            .min_level(MiniLevel::Trace)
            .scope_text(">>", "<<");
        let mini = Mini::new(config, console);
        drop(ScopeTracer::on(&mini, "f()"));
        assert_eq!(
            capture.stdout_lines(),
            vec!["[TRACE] : >> : f()", "[TRACE] : << : f()"]
        );
    }
}
