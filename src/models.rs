use serde::Serialize;

/// One launchable application, as printed in the output array.
///
/// Text fields hold the raw (unescaped) values read from the desktop file;
/// escaping happens when the document is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct AppEntry {
    pub name: String,
    pub exec: String,
    pub description: String,
    pub icon_path: String,
}
