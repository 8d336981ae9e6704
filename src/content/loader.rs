//! Post store - reads post records from the posts directory

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{FrontMatter, PostRecord};
use crate::error::PostError;

/// Reads posts from a single storage directory.
///
/// Every regular, non-hidden file directly inside the root is a post. The
/// store holds no state beyond its root, so each call re-reads storage.
#[derive(Debug, Clone)]
pub struct PostStore {
    root: PathBuf,
}

impl PostStore {
    /// Create a store over `root`
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Storage root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read every post in storage, in file-name order.
    ///
    /// The first malformed post aborts the read; nothing is skipped.
    pub fn list_all_posts(&self) -> Result<Vec<PostRecord>, PostError> {
        let files = self.post_files()?;
        let mut posts = Vec::with_capacity(files.len());

        for path in files {
            posts.push(load_post(&path)?);
        }

        tracing::debug!("Read {} posts from {:?}", posts.len(), self.root);
        Ok(posts)
    }

    /// Read the post with the given id
    pub fn read_post(&self, id: &str) -> Result<PostRecord, PostError> {
        if id.is_empty() || id.starts_with('.') || id.contains(['/', '\\']) {
            return Err(PostError::NotFound(id.to_string()));
        }

        let path = self
            .post_files()?
            .into_iter()
            .find(|p| post_id(p).as_deref() == Some(id))
            .ok_or_else(|| PostError::NotFound(id.to_string()))?;

        load_post(&path)
    }

    /// Paths of all post files, sorted by file name.
    ///
    /// Two files mapping to the same id fail the read, naming the second.
    fn post_files(&self) -> Result<Vec<PathBuf>, PostError> {
        let unavailable = |source: io::Error| PostError::StorageUnavailable {
            path: self.root.clone(),
            source,
        };

        let metadata = fs::metadata(&self.root).map_err(unavailable)?;
        if !metadata.is_dir() {
            return Err(unavailable(io::Error::new(
                io::ErrorKind::Other,
                "not a directory",
            )));
        }

        let mut files = Vec::new();
        let mut ids = HashSet::new();
        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| unavailable(e.into()))?;
            if !entry.file_type().is_file() || is_hidden(entry.path()) {
                continue;
            }

            if let Some(id) = post_id(entry.path()) {
                if !ids.insert(id.clone()) {
                    return Err(PostError::metadata(
                        entry.file_name().to_string_lossy(),
                        format!("duplicate post id {:?}", id),
                    ));
                }
            }
            files.push(entry.into_path());
        }

        Ok(files)
    }
}

/// Read and parse a single post file
fn load_post(path: &Path) -> Result<PostRecord, PostError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let id = post_id(path)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| PostError::metadata(&name, "file name gives an empty id"))?;

    let raw = fs::read_to_string(path).map_err(|source| PostError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let (fm, body) = FrontMatter::parse(&name, &raw)?;
    let (title, date) = fm.require(&name)?;

    Ok(PostRecord {
        id,
        title,
        date,
        content: body.to_string(),
    })
}

/// Post id: the file name without its extension
fn post_id(path: &Path) -> Option<String> {
    path.file_stem().map(|s| s.to_string_lossy().to_string())
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_post(dir: &Path, file: &str, title: &str, date: &str) {
        let content = format!("---\ntitle: {}\ndate: {}\n---\n\nBody of {}.\n", title, date, file);
        fs::write(dir.join(file), content).unwrap();
    }

    #[test]
    fn test_list_all_posts() {
        let tmp = TempDir::new().unwrap();
        write_post(tmp.path(), "b.md", "Second", "2020-06-15");
        write_post(tmp.path(), "a.md", "First", "2020-01-01");

        let posts = PostStore::new(tmp.path()).list_all_posts().unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, "a");
        assert_eq!(posts[0].title, "First");
        assert_eq!(posts[0].date, "2020-01-01");
        assert_eq!(posts[0].content, "Body of a.md.\n");
        assert_eq!(posts[1].id, "b");
    }

    #[test]
    fn test_skips_hidden_files_and_directories() {
        let tmp = TempDir::new().unwrap();
        write_post(tmp.path(), "real.md", "Real", "2020-01-01");
        fs::write(tmp.path().join(".DS_Store"), "junk").unwrap();
        fs::create_dir(tmp.path().join("images")).unwrap();
        write_post(&tmp.path().join("images"), "nested.md", "Nested", "2020-01-01");

        let posts = PostStore::new(tmp.path()).list_all_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, "real");
    }

    #[test]
    fn test_empty_storage() {
        let tmp = TempDir::new().unwrap();
        let posts = PostStore::new(tmp.path()).list_all_posts().unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn test_missing_storage() {
        let tmp = TempDir::new().unwrap();
        let store = PostStore::new(tmp.path().join("nope"));
        let err = store.list_all_posts().unwrap_err();
        assert!(matches!(err, PostError::StorageUnavailable { .. }));
    }

    #[test]
    fn test_storage_is_a_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("posts");
        fs::write(&file, "").unwrap();
        let err = PostStore::new(&file).list_all_posts().unwrap_err();
        assert!(matches!(err, PostError::StorageUnavailable { .. }));
    }

    #[test]
    fn test_malformed_post_fails_whole_read() {
        let tmp = TempDir::new().unwrap();
        write_post(tmp.path(), "good.md", "Good", "2020-01-01");
        fs::write(tmp.path().join("broken.md"), "---\ntitle: Broken\n---\n").unwrap();

        let err = PostStore::new(tmp.path()).list_all_posts().unwrap_err();
        match err {
            PostError::MetadataParse { name, .. } => assert_eq!(name, "broken.md"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_ids_fail_the_read() {
        let tmp = TempDir::new().unwrap();
        write_post(tmp.path(), "a.md", "One", "2020-01-01");
        write_post(tmp.path(), "a.txt", "Two", "2021-01-01");

        let store = PostStore::new(tmp.path());
        match store.list_all_posts().unwrap_err() {
            PostError::MetadataParse { name, reason } => {
                assert_eq!(name, "a.txt");
                assert!(reason.contains("duplicate"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(
            store.read_post("a"),
            Err(PostError::MetadataParse { .. })
        ));
    }

    #[test]
    fn test_extensionless_file_clashes_with_markdown() {
        let tmp = TempDir::new().unwrap();
        write_post(tmp.path(), "a", "Bare", "2020-01-01");
        write_post(tmp.path(), "a.md", "Markdown", "2020-01-01");

        let err = PostStore::new(tmp.path()).list_all_posts().unwrap_err();
        assert!(matches!(err, PostError::MetadataParse { ref name, .. } if name == "a.md"));
    }

    #[test]
    fn test_read_post() {
        let tmp = TempDir::new().unwrap();
        write_post(tmp.path(), "hello-world.md", "Hello", "2021-02-03");

        let store = PostStore::new(tmp.path());
        let post = store.read_post("hello-world").unwrap();
        assert_eq!(post.title, "Hello");
        assert!(post.content.contains("Body of hello-world.md."));

        assert!(matches!(
            store.read_post("missing"),
            Err(PostError::NotFound(_))
        ));
        assert!(matches!(
            store.read_post("../hello-world"),
            Err(PostError::NotFound(_))
        ));
    }
}
