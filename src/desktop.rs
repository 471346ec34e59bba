use crate::icons::{IconLookup, resolve_icon};
use crate::keyfile::{KeyFile, KeyFileError};
use crate::models::AppEntry;
use std::path::Path;
use thiserror::Error;

const GROUP: &str = "Desktop Entry";

/// Shared, read-only inputs for parsing every file of a run.
pub struct ParseContext<'a> {
    pub icons: &'a dyn IconLookup,
    pub icon_size: u32,
    /// Locale tags for `Name[..]`/`Comment[..]`, most specific first.
    pub locales: Vec<String>,
}

/// Why a file produced no entry. Never shown to the user outside of logs.
#[derive(Debug, Error)]
pub enum Skip {
    #[error("unreadable: {0}")]
    Unreadable(#[from] KeyFileError),
    #[error("no [Desktop Entry] group")]
    NoDesktopGroup,
    #[error("Type is not Application")]
    NotApplication,
    #[error("NoDisplay=true")]
    NoDisplay,
    #[error("missing or empty Exec")]
    MissingExec,
    #[error("missing or empty Name")]
    MissingName,
}

pub fn parse_desktop_file(path: &Path, ctx: &ParseContext<'_>) -> Result<AppEntry, Skip> {
    let kf = KeyFile::load(path)?;
    entry_from_keyfile(&kf, ctx)
}

fn entry_from_keyfile(kf: &KeyFile, ctx: &ParseContext<'_>) -> Result<AppEntry, Skip> {
    if !kf.has_group(GROUP) {
        return Err(Skip::NoDesktopGroup);
    }

    if kf.string(GROUP, "Type").as_deref() != Some("Application") {
        return Err(Skip::NotApplication);
    }

    // A malformed boolean counts as false.
    if matches!(kf.boolean(GROUP, "NoDisplay"), Ok(Some(true))) {
        return Err(Skip::NoDisplay);
    }

    let exec = kf
        .string(GROUP, "Exec")
        .filter(|s| !s.is_empty())
        .ok_or(Skip::MissingExec)?;

    let name = kf
        .locale_string(GROUP, "Name", &ctx.locales)
        .filter(|s| !s.is_empty())
        .ok_or(Skip::MissingName)?;

    let description = kf
        .locale_string(GROUP, "Comment", &ctx.locales)
        .unwrap_or_default();

    let icon = kf.string(GROUP, "Icon");
    let icon_path = resolve_icon(icon.as_deref(), ctx.icons, ctx.icon_size)
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(AppEntry {
        name,
        exec,
        description,
        icon_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::testing::FakeIconLookup;
    use std::fs;
    use tempfile::TempDir;

    fn ctx(icons: &FakeIconLookup) -> ParseContext<'_> {
        ParseContext {
            icons,
            icon_size: 48,
            locales: vec!["de_DE".to_string(), "de".to_string()],
        }
    }

    fn parse(body: &str, icons: &FakeIconLookup) -> Result<AppEntry, Skip> {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.desktop");
        fs::write(&path, body).unwrap();
        parse_desktop_file(&path, &ctx(icons))
    }

    #[test]
    fn firefox_without_theme_icon() {
        let icons = FakeIconLookup::default();
        let entry = parse(
            "[Desktop Entry]\nType=Application\nName=Firefox\nExec=firefox %u\nComment=Web Browser\nIcon=firefox\n",
            &icons,
        )
        .unwrap();
        assert_eq!(
            entry,
            AppEntry {
                name: "Firefox".into(),
                exec: "firefox %u".into(),
                description: "Web Browser".into(),
                icon_path: String::new(),
            }
        );
        assert_eq!(icons.requests.borrow()[0].0, "firefox");
    }

    #[test]
    fn resolved_and_absolute_icons() {
        let icons = FakeIconLookup::default().with("term", Some("/usr/share/icons/term.svg"));
        let themed = parse(
            "[Desktop Entry]\nType=Application\nName=Term\nExec=term\nIcon=term\n",
            &icons,
        )
        .unwrap();
        assert_eq!(themed.icon_path, "/usr/share/icons/term.svg");

        let absolute = parse(
            "[Desktop Entry]\nType=Application\nName=Term\nExec=term\nIcon=/opt/term/icon.png\n",
            &icons,
        )
        .unwrap();
        assert_eq!(absolute.icon_path, "/opt/term/icon.png");
    }

    #[test]
    fn optional_fields_default_to_empty() {
        let icons = FakeIconLookup::default();
        let entry = parse("[Desktop Entry]\nType=Application\nName=X\nExec=x\n", &icons).unwrap();
        assert_eq!(entry.description, "");
        assert_eq!(entry.icon_path, "");
        assert!(icons.requests.borrow().is_empty());
    }

    #[test]
    fn localized_name_and_comment() {
        let icons = FakeIconLookup::default();
        let entry = parse(
            "[Desktop Entry]\nType=Application\nName=Files\nName[de]=Dateien\nComment=Browse\nComment[fr]=Parcourir\nExec=nautilus\n",
            &icons,
        )
        .unwrap();
        assert_eq!(entry.name, "Dateien");
        assert_eq!(entry.description, "Browse");
    }

    #[test]
    fn special_characters_survive_raw() {
        let icons = FakeIconLookup::default();
        let entry = parse(
            "[Desktop Entry]\nType=Application\nName=Na\"me\\tValue\nExec=sh -c \"echo \\\\\"\n",
            &icons,
        )
        .unwrap();
        assert_eq!(entry.name, "Na\"me\tValue");
        assert_eq!(entry.exec, "sh -c \"echo \\\"");
    }

    #[test]
    fn skip_reasons() {
        let icons = FakeIconLookup::default();
        let cases = [
            ("[Desktop Entry]\nType=Link\nName=L\nExec=l\n", "NotApplication"),
            ("[Desktop Entry]\nName=L\nExec=l\n", "NotApplication"),
            ("[Desktop Entry]\nType=application\nName=L\nExec=l\n", "NotApplication"),
            (
                "[Desktop Entry]\nType=Application\nNoDisplay=true\nName=L\nExec=l\n",
                "NoDisplay",
            ),
            ("[Desktop Entry]\nType=Application\nName=L\n", "MissingExec"),
            ("[Desktop Entry]\nType=Application\nName=L\nExec=\n", "MissingExec"),
            ("[Desktop Entry]\nType=Application\nExec=l\n", "MissingName"),
            ("[Desktop Entry]\nType=Application\nName=\nExec=l\n", "MissingName"),
            ("[Other]\nType=Application\nName=L\nExec=l\n", "NoDesktopGroup"),
            ("[Desktop Entry]\nthis is not valid\n", "Unreadable"),
        ];

        for (body, want) in cases {
            let err = parse(body, &icons).unwrap_err();
            let got = format!("{err:?}");
            assert!(got.starts_with(want), "{body:?}: got {got}, want {want}");
        }
    }

    #[test]
    fn nodisplay_false_or_garbage_is_kept() {
        let icons = FakeIconLookup::default();
        for v in ["false", "0", "sometimes"] {
            let body = format!("[Desktop Entry]\nType=Application\nNoDisplay={v}\nName=L\nExec=l\n");
            assert!(parse(&body, &icons).is_ok(), "NoDisplay={v}");
        }
    }

    #[test]
    fn keys_outside_desktop_group_are_ignored() {
        let icons = FakeIconLookup::default();
        let entry = parse(
            "[Desktop Entry]\nType=Application\nName=Main\nExec=main\n\n[Desktop Action new]\nName=Other\nExec=other\n",
            &icons,
        )
        .unwrap();
        assert_eq!(entry.name, "Main");
        assert_eq!(entry.exec, "main");
    }

    #[test]
    fn non_utf8_translation_keeps_entry() {
        let icons = FakeIconLookup::default();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("legacy.desktop");
        fs::write(
            &path,
            b"[Desktop Entry]\nType=Application\nName=Legacy\nExec=legacy\nComment[fr]=R\xe9seau\n",
        )
        .unwrap();

        let ctx = ParseContext {
            icons: &icons,
            icon_size: 48,
            locales: Vec::new(),
        };
        let entry = parse_desktop_file(&path, &ctx).unwrap();
        assert_eq!(entry.name, "Legacy");
        assert_eq!(entry.exec, "legacy");
        assert_eq!(entry.description, "");
    }

    #[test]
    fn missing_file_is_skipped() {
        let icons = FakeIconLookup::default();
        let dir = TempDir::new().unwrap();
        let err = parse_desktop_file(&dir.path().join("nope.desktop"), &ctx(&icons)).unwrap_err();
        assert!(matches!(err, Skip::Unreadable(_)));
    }
}
