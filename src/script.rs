use std::{fs, path::Path};

use anyhow::{bail, Context, Result};

/// Activates non-blocking plotting; always appended as the final preload
/// statement.
pub const ACTIVATE_PLOTTING: &str = "plt.ion()";

/// Builds the list of statements the session executes before the first
/// prompt: the script's lines (newlines preserved) when a script was
/// given, then the plotting activation statement.
///
/// A missing script path is fatal and reported before any session starts.
pub fn preload_statements(script: Option<&Path>) -> Result<Vec<String>> {
    let mut statements = match script {
        Some(path) => {
            if !path.exists() {
                bail!("script not found: {}", path.display());
            }

            fs::read_to_string(path)
                .with_context(|| format!("unable to read script: {}", path.display()))?
                .split_inclusive('\n')
                .map(str::to_string)
                .collect()
        }
        None => vec![],
    };

    statements.push(ACTIVATE_PLOTTING.to_string());
    Ok(statements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_no_script() {
        assert_eq!(
            preload_statements(None).unwrap(),
            vec!["plt.ion()".to_string()]
        );
    }

    #[test]
    fn test_script_lines_then_activation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "a = 1\nb = 2\n").unwrap();

        assert_eq!(
            preload_statements(Some(file.path())).unwrap(),
            vec![
                "a = 1\n".to_string(),
                "b = 2\n".to_string(),
                "plt.ion()".to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_script() {
        let file = tempfile::NamedTempFile::new().unwrap();

        assert_eq!(
            preload_statements(Some(file.path())).unwrap(),
            vec!["plt.ion()".to_string()]
        );
    }

    #[test]
    fn test_missing_script_names_the_path() {
        let err = preload_statements(Some(Path::new("/no/such/script.rsh"))).unwrap_err();
        assert!(err.to_string().contains("/no/such/script.rsh"));
    }
}
