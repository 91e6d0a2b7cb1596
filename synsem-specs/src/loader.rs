//! Fixture file loading.

use crate::errors::{SpecError, SpecResult};
use crate::fixture::SearchFixture;
use std::fs;
use std::path::Path;

/// Parse fixture TOML. `origin` names the source in errors.
pub fn parse_fixture(content: &str, origin: &str) -> SpecResult<SearchFixture> {
    let fixture: SearchFixture = toml::from_str(content).map_err(|e| SpecError::Parse {
        path: origin.to_string(),
        message: e.to_string(),
    })?;
    if fixture.cases.is_empty() {
        return Err(SpecError::Invalid {
            path: origin.to_string(),
            message: "fixture defines no cases".into(),
        });
    }
    Ok(fixture)
}

/// Load a single fixture file.
pub fn load_fixture(path: &Path) -> SpecResult<SearchFixture> {
    let content = fs::read_to_string(path).map_err(|e| SpecError::Load {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_fixture(&content, &path.display().to_string())
}

/// Load all fixtures under a directory (glob: **/*.toml), sorted by
/// relative path.
pub fn load_all_fixtures(dir: &Path) -> SpecResult<Vec<(String, SearchFixture)>> {
    let mut fixtures = Vec::new();
    load_fixtures_recursive(dir, dir, &mut fixtures)?;
    fixtures.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(fixtures)
}

fn load_fixtures_recursive(
    base: &Path,
    dir: &Path,
    fixtures: &mut Vec<(String, SearchFixture)>,
) -> SpecResult<()> {
    if !dir.is_dir() {
        return Ok(());
    }

    for entry in fs::read_dir(dir).map_err(|e| SpecError::Load {
        path: dir.display().to_string(),
        message: e.to_string(),
    })? {
        let entry = entry.map_err(|e| SpecError::Load {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;
        let path = entry.path();

        if path.is_dir() {
            load_fixtures_recursive(base, &path, fixtures)?;
        } else if path.extension().map_or(false, |e| e == "toml") {
            let relative = path.strip_prefix(base).unwrap_or(&path);
            let fixture = load_fixture(&path)?;
            fixtures.push((relative.display().to_string(), fixture));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_fixture() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("fixtures")
            .join("bring-roles.toml");
        let fixture = load_fixture(&path).unwrap();
        assert!(fixture.title.is_some());
        assert!(!fixture.members.is_empty());
    }

    #[test]
    fn test_load_all_fixtures() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
        let fixtures = load_all_fixtures(&dir).unwrap();
        assert!(fixtures.len() >= 5);
        assert!(fixtures.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_fixture_without_cases_is_invalid() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "title = \"empty\"").unwrap();
        let err = load_fixture(file.path()).unwrap_err();
        assert!(matches!(err, SpecError::Invalid { .. }));
    }

    #[test]
    fn test_bad_toml_reports_parse_error() {
        let err = parse_fixture("[[cases]]\nname = 3", "inline").unwrap_err();
        assert!(matches!(err, SpecError::Parse { ref path, .. } if path == "inline"));
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let fixtures = load_all_fixtures(Path::new("/nonexistent/fixtures")).unwrap();
        assert!(fixtures.is_empty());
    }
}
