//! Include snippet rendering and render sinks

use std::io::Write;
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;
use tracing::debug;

/// Placeholder replaced by the resolved version in include URLs
pub const VERSION_PLACEHOLDER: &str = "${version}";

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Release listing has no version name")]
    MissingVersion,

    #[error("Failed to write {target}: {source}")]
    Io {
        target: String,
        source: std::io::Error,
    },

    #[error("Invalid target id {0:?}")]
    InvalidTarget(String),

    #[error("Render sink lock poisoned")]
    LockPoisoned,
}

/// Renders the HTML-escaped include snippet shown inside the target `<pre>` element
pub fn render_snippet(description: &str, url_template: &str, version: &str) -> String {
    let url = url_template.replacen(VERSION_PLACEHOLDER, version, 1);
    format!(
        "&lt;!-- {description} --&gt;\n&lt;script src&#x3D;&quot;{url}&quot;&gt;&lt;/script&gt;"
    )
}

/// Destination of rendered snippets
pub trait RenderSink: Send + Sync {
    /// Replaces the content of `target_id` with `text`
    fn render(&self, target_id: &str, text: &str) -> Result<(), RenderError>;
}

/// Writes each snippet to a stream, preceded by a comment naming the target
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> Result<W, RenderError> {
        self.writer.into_inner().map_err(|_| RenderError::LockPoisoned)
    }
}

impl<W: Write + Send> RenderSink for WriterSink<W> {
    fn render(&self, target_id: &str, text: &str) -> Result<(), RenderError> {
        let mut writer = self.writer.lock().map_err(|_| RenderError::LockPoisoned)?;
        writeln!(writer, "<!-- {target_id} -->\n{text}").map_err(|source| RenderError::Io {
            target: target_id.to_string(),
            source,
        })
    }
}

/// Writes each snippet to `<dir>/<target_id>.html`.
///
/// Files are replaced atomically, so a failed write leaves the previous content in place.
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl RenderSink for DirectorySink {
    fn render(&self, target_id: &str, text: &str) -> Result<(), RenderError> {
        let io_err = |source| RenderError::Io {
            target: target_id.to_string(),
            source,
        };

        if !is_plain_target(target_id) {
            return Err(RenderError::InvalidTarget(target_id.to_string()));
        }

        std::fs::create_dir_all(&self.dir).map_err(io_err)?;
        let path = self.dir.join(format!("{target_id}.html"));

        let mut file = NamedTempFile::new_in(&self.dir).map_err(io_err)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o644))
                .map_err(io_err)?;
        }
        file.write_all(text.as_bytes()).map_err(io_err)?;
        file.persist(&path).map_err(|e| io_err(e.error))?;

        debug!("Wrote {:?}", path);
        Ok(())
    }
}

/// True if `target_id` names a single file inside the output directory
fn is_plain_target(target_id: &str) -> bool {
    let mut components = Path::new(target_id).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !target_id.contains(['/', '\\'])
}
