use derive_new::new;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use sha1::{Digest, Sha1};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Hand-built `.git` directory: HEAD, refs, tags and loose objects only
#[derive(Debug, Clone, new)]
pub struct GitDir {
    pub path: PathBuf,
}

#[derive(Debug, Clone, new)]
pub struct CommitSpec {
    pub timestamp: i64,
    pub timezone: String,
    pub message: String,
}

impl CommitSpec {
    /// Commit body as git writes it, author and committer on the same date
    pub fn to_text(&self) -> String {
        format!(
            "tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904\n\
             author fake_user <fake_email@email.com> {ts} {tz}\n\
             committer fake_user <fake_email@email.com> {ts} {tz}\n\
             \n\
             {message}",
            ts = self.timestamp,
            tz = self.timezone,
            message = self.message
        )
    }
}

impl GitDir {
    /// Create an empty layout under `parent/.git` with HEAD on `main`
    pub fn init(parent: &Path) -> Self {
        let git_dir = GitDir::new(parent.join(".git"));
        std::fs::create_dir_all(git_dir.path.join("objects")).expect("Failed to create objects");
        std::fs::create_dir_all(git_dir.path.join("refs").join("heads"))
            .expect("Failed to create refs/heads");
        std::fs::create_dir_all(git_dir.path.join("refs").join("tags"))
            .expect("Failed to create refs/tags");
        git_dir.set_head("ref: refs/heads/main\n");
        git_dir
    }

    pub fn set_head(&self, content: &str) {
        self.write(Path::new("HEAD"), content.as_bytes());
    }

    /// Write a loose object and return its id
    pub fn write_object(&self, kind: &str, payload: &[u8]) -> String {
        let mut content = format!("{} {}\0", kind, payload.len()).into_bytes();
        content.extend_from_slice(payload);

        let oid = format!("{:x}", Sha1::digest(&content));
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&content).expect("Failed to compress object");
        let compressed = encoder.finish().expect("Failed to compress object");

        let (dir, file) = oid.split_at(2);
        self.write(&Path::new("objects").join(dir).join(file), &compressed);
        oid
    }

    pub fn write_commit(&self, spec: &CommitSpec) -> String {
        self.write_object("commit", spec.to_text().as_bytes())
    }

    /// Point `refs/heads/<branch>` at `oid`
    pub fn set_branch(&self, branch: &str, oid: &str) {
        self.write(
            &Path::new("refs").join("heads").join(branch),
            format!("{}\n", oid).as_bytes(),
        );
    }

    pub fn add_tag(&self, name: &str, oid: &str) {
        self.write(
            &Path::new("refs").join("tags").join(name),
            format!("{}\n", oid).as_bytes(),
        );
    }

    pub fn write_packed_refs(&self, entries: &[(&str, &str)]) {
        let mut content = String::from("# pack-refs with: peeled fully-peeled sorted \n");
        for (ref_path, oid) in entries {
            content.push_str(&format!("{} {}\n", oid, ref_path));
        }
        self.write(Path::new("packed-refs"), content.as_bytes());
    }

    /// Commit on `main` and move the branch to it
    pub fn commit_on_main(&self, spec: &CommitSpec) -> String {
        let oid = self.write_commit(spec);
        self.set_branch("main", &oid);
        oid
    }

    pub fn remove(&self, relative: &Path) {
        std::fs::remove_file(self.path.join(relative))
            .unwrap_or_else(|e| panic!("Failed to remove {:?}: {}", relative, e));
    }

    fn write(&self, relative: &Path, content: &[u8]) {
        let path = self.path.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("Failed to create directory {:?}: {}", parent, e));
        }
        std::fs::write(&path, content)
            .unwrap_or_else(|e| panic!("Failed to write file {:?}: {}", path, e));
    }
}
