/*!
 * Common test utilities for the locqa test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;

static LOGGING: Once = Once::new();

/// Route library logs to the test output (RUST_LOG controls the level)
pub fn init_logging() {
    LOGGING.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Bilingual CSV with one gap, one broken placeholder and one clean row
pub const SAMPLE_CSV: &str = "key,source,target,note
menu.open,Open,Ouvrir,
menu.greeting,\"Hello {name}, welcome back!\",\"Bonjour, bon retour !\",home screen
menu.quit,Quit,,
menu.save,Save,Enregistrer,
";

/// XLIFF with markup and number defects
pub const SAMPLE_XLIFF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff version="1.2" xmlns="urn:oasis:names:tc:xliff:document:1.2">
  <file source-language="en" target-language="de" datatype="plaintext" original="app">
    <body>
      <trans-unit id="cart.items">
        <source>You have 3 items in your &lt;b&gt;cart&lt;/b&gt;.</source>
        <target>Sie haben 4 Artikel in Ihrem Warenkorb.</target>
      </trans-unit>
      <trans-unit id="cart.empty">
        <source>Your cart is empty.</source>
        <target>Ihr Warenkorb ist leer.</target>
      </trans-unit>
    </body>
  </file>
</xliff>"#;

/// Monolingual English source locale
pub const SOURCE_YAML: &str = "en:
  app:
    title: Task Manager
    tasks: \"%d tasks left\"
    delete: Delete
";

/// Monolingual Spanish locale missing one key
pub const TARGET_YAML: &str = "es:
  app:
    title: Gestor de tareas
    tasks: \"Quedan %d tareas\"
";
