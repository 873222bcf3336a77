//! Go source file skeleton, rendered through Handlebars.

use handlebars::Handlebars;
use log::debug;
use serde::Serialize;

use crate::Error;

const SOURCE_FILE: &str = "source-file";

// Each import sits on its own line. The function is expected to carry its own
// trailing newline.
const SOURCE_FILE_TEMPLATE: &str =
    "package {{package}}\n\nimport (\n{{#each imports}}\t\"{{this}}\"\n{{/each}})\n\n{{function}}";

#[derive(Debug, Serialize)]
struct SourceFileData<'a> {
    package: &'a str,
    imports: &'a [&'a str],
    function: &'a str,
}

/// Renders complete Go source files around a printed function.
pub struct SourceFile<'reg> {
    hb: Handlebars<'reg>,
}

impl<'reg> SourceFile<'reg> {
    /// Constructor. Compiles the source file template.
    pub fn new() -> Result<Self, Error> {
        let mut hb = Handlebars::new();
        hb.set_strict_mode(true);
        // Output is Go, not HTML.
        hb.register_escape_fn(handlebars::no_escape);
        hb.register_template_string(SOURCE_FILE, SOURCE_FILE_TEMPLATE)
            .map_err(|e| Error::TemplateParse(SOURCE_FILE.to_string(), e))?;
        debug!("Registered template {}", SOURCE_FILE);
        Ok(Self { hb })
    }

    /// Renders a file in the given package with the given imports, containing
    /// the given function source.
    pub fn render(&self, package: &str, imports: &[&str], function: &str) -> Result<String, Error> {
        let data = SourceFileData {
            package,
            imports,
            function,
        };
        self.hb
            .render(SOURCE_FILE, &data)
            .map_err(|e| Error::TemplateRender(SOURCE_FILE.to_string(), e))
    }
}
