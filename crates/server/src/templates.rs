//! HTML page templates.

use minijinja::Environment;
use serde::Serialize;

const TEMPLATES: [(&str, &str); 4] = [
    ("base.html", include_str!("../templates/base.html")),
    ("upload.html", include_str!("../templates/upload.html")),
    ("watch.html", include_str!("../templates/watch.html")),
    ("my_videos.html", include_str!("../templates/my_videos.html")),
];

/// The compiled page templates. `.html` templates are auto-escaped.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, context: S) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(context)
    }
}

impl std::fmt::Debug for Templates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Templates")
            .field("count", &TEMPLATES.len())
            .finish()
    }
}
