use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};

/// Get a Command for sitesearch, isolated from the caller's environment
pub fn sitesearch() -> Command {
    let mut cmd = cargo_bin_cmd!("sitesearch");
    cmd.env_remove("SITESEARCH_STORE")
        .env_remove("SITESEARCH_LOG")
        .env_remove("RUST_LOG");
    cmd
}

pub const STORE_JS: &str = r#"window.store = {
  "/posts/cats/": {
    "title": "All about cats",
    "url": "/posts/cats/",
    "content": "Introduction Cats sleep most of the day.",
    "category": "pets"
  },
  "/posts/dogs/": {
    "title": "Dogs",
    "url": "/posts/dogs/",
    "content": "Dogs chase cats around the yard.",
    "category": "pets"
  },
  "/posts/bread/": {
    "title": "Sourdough bread",
    "url": "/posts/bread/",
    "content": "Flour, water and patience.",
    "category": "baking"
  }
};
"#;

pub const PAGE_HTML: &str = r#"<html>
<body>
<h1>Search</h1>
<ul id="result"><li>placeholder</li></ul>
<footer>site</footer>
</body>
</html>
"#;

/// Write the sample store as a script file and return its path
pub fn write_store(dir: &Path) -> PathBuf {
    let path = dir.join("search.js");
    fs::write(&path, STORE_JS).unwrap();
    path
}

/// Write the sample results page and return its path
pub fn write_page(dir: &Path) -> PathBuf {
    let path = dir.join("search.html");
    fs::write(&path, PAGE_HTML).unwrap();
    path
}
