//! Mailbox scanning for the status bar
//!
//! Supports plain mbox files and maildir trees. Every outcome is a distinct
//! [`MailReport`] variant so "no new mail", "new mail" and "that path is not
//! a mailbox" are distinguishable, rather than collapsing errors into an
//! empty report.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur scanning a mailbox
#[derive(Debug, Error)]
pub enum MailError {
    /// Reading the mailbox file or directory failed
    #[error("Mailbox I/O failed for {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Outcome of scanning one mailbox path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailReport {
    /// The mailbox exists (or is absent/empty) and holds no unread mail
    NoMail,
    /// Unread mail was found; `(folder name, unread count)` per folder
    NewMail(Vec<(String, usize)>),
    /// The path exists but is neither an mbox file nor a maildir tree
    NotAMailbox(PathBuf),
}

/// Colors used when rendering reports into bar entries.
#[derive(Debug, Clone)]
pub struct MailColors {
    pub good: String,
    pub degraded: String,
    pub bad: String,
}

impl Default for MailColors {
    fn default() -> Self {
        Self {
            good: "#00FF00".to_string(),
            degraded: "#FFFF00".to_string(),
            bad: "#FF0000".to_string(),
        }
    }
}

impl MailReport {
    /// Renders the report as the bar text, using `nomail` as the
    /// placeholder when there is nothing to show.
    pub fn render(&self, nomail: &str) -> String {
        match self {
            MailReport::NoMail => nomail.to_string(),
            MailReport::NewMail(folders) => folders
                .iter()
                .map(|(name, count)| format!("{}:{}", name, count))
                .collect::<Vec<_>>()
                .join(" "),
            MailReport::NotAMailbox(path) => format!("{}: not a mailbox", path.display()),
        }
    }

    /// Picks the display color for this report.
    pub fn color<'a>(&self, colors: &'a MailColors) -> &'a str {
        match self {
            MailReport::NoMail => &colors.good,
            MailReport::NewMail(_) => &colors.degraded,
            MailReport::NotAMailbox(_) => &colors.bad,
        }
    }
}

/// Resolves a mailbox argument, anchoring relative paths at `$HOME`.
pub fn resolve_mailbox(path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        return p.to_path_buf();
    }
    match std::env::var_os("HOME") {
        Some(home) => Path::new(&home).join(p),
        None => p.to_path_buf(),
    }
}

/// Scans one mailbox path and classifies what was found.
///
/// A missing or zero-length path counts as no mail. A regular file is
/// treated as mbox, a directory as a maildir tree; anything else (or a file
/// that does not look like mbox) is reported as not a mailbox.
///
/// # Arguments
/// * `path` - Absolute path of the mailbox
/// * `ignore` - Maildir folder names to skip when counting
pub fn check_mailbox(path: &Path, ignore: &[String]) -> Result<MailReport, MailError> {
    let io_err = |source: io::Error| MailError::Io {
        path: path.to_path_buf(),
        source,
    };

    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(MailReport::NoMail),
        Err(e) => return Err(io_err(e)),
    };

    if metadata.is_file() {
        if metadata.len() == 0 {
            return Ok(MailReport::NoMail);
        }
        let content = fs::read(path).map_err(io_err)?;
        return Ok(check_mbox(path, &content));
    }

    if metadata.is_dir() {
        return check_maildir(path, ignore).map_err(io_err);
    }

    Ok(MailReport::NotAMailbox(path.to_path_buf()))
}

/// Classifies an mbox file's contents, counting unflagged messages.
fn check_mbox(path: &Path, content: &[u8]) -> MailReport {
    let text = String::from_utf8_lossy(content);

    if !text.starts_with("From ") {
        return MailReport::NotAMailbox(path.to_path_buf());
    }

    let mut unread = 0usize;
    for message in split_mbox_messages(&text) {
        if message_flags(message).is_empty() {
            unread += 1;
        }
    }

    if unread > 0 {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        MailReport::NewMail(vec![(name, unread)])
    } else {
        MailReport::NoMail
    }
}

/// Splits mbox text into messages on "From " separator lines.
fn split_mbox_messages(text: &str) -> Vec<&str> {
    let mut messages = Vec::new();
    let mut start = None;
    for (offset, line) in line_offsets(text) {
        if line.starts_with("From ") {
            if let Some(s) = start {
                messages.push(&text[s..offset]);
            }
            start = Some(offset);
        }
    }
    if let Some(s) = start {
        messages.push(&text[s..]);
    }
    messages
}

/// Yields each line of `text` together with its byte offset.
fn line_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    text.split_inclusive('\n').map(move |line| {
        let here = offset;
        offset += line.len();
        (here, line)
    })
}

/// Extracts the mbox flag characters from a message's Status headers.
///
/// A message with no Status/X-Status flags at all is unread. Only the
/// header block (up to the first blank line) is inspected.
fn message_flags(message: &str) -> String {
    let mut flags = String::new();
    for line in message.lines().skip(1) {
        if line.is_empty() {
            break;
        }
        let lower = line.to_ascii_lowercase();
        for header in ["status:", "x-status:"] {
            if let Some(value) = lower.strip_prefix(header) {
                flags.push_str(value.trim());
            }
        }
    }
    flags
}

/// Scans a maildir tree: each subdirectory with a `new/` folder is a
/// maildir, and files under `new/` are unread messages.
fn check_maildir(path: &Path, ignore: &[String]) -> io::Result<MailReport> {
    let mut maildirs = 0usize;
    let mut folders: Vec<(String, usize)> = Vec::new();

    let mut entries: Vec<_> = fs::read_dir(path)?.collect::<Result<_, _>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let subdir = entry.path();
        if !subdir.is_dir() {
            continue;
        }
        let new_dir = subdir.join("new");
        if !new_dir.is_dir() {
            continue;
        }
        maildirs += 1;

        let name = entry.file_name().to_string_lossy().into_owned();
        if ignore.iter().any(|i| *i == name) {
            continue;
        }

        let messages = fs::read_dir(&new_dir)?.count();
        if messages > 0 {
            folders.push((name, messages));
        }
    }

    if maildirs == 0 {
        return Ok(MailReport::NotAMailbox(path.to_path_buf()));
    }
    if folders.is_empty() {
        Ok(MailReport::NoMail)
    } else {
        Ok(MailReport::NewMail(folders))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const UNREAD_MESSAGE: &str = "From alice@example.com Mon Jan  1 00:00:00 2024\n\
         From: alice@example.com\n\
         Subject: hello\n\
         \n\
         body\n";

    const READ_MESSAGE: &str = "From bob@example.com Mon Jan  1 00:00:00 2024\n\
         From: bob@example.com\n\
         Status: RO\n\
         Subject: old news\n\
         \n\
         body\n";

    #[test]
    fn test_missing_path_is_no_mail() {
        let dir = TempDir::new().unwrap();
        let report = check_mailbox(&dir.path().join("absent"), &[]).unwrap();
        assert_eq!(report, MailReport::NoMail);
    }

    #[test]
    fn test_empty_file_is_no_mail() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mbox");
        fs::write(&path, "").unwrap();

        assert_eq!(check_mailbox(&path, &[]).unwrap(), MailReport::NoMail);
    }

    #[test]
    fn test_mbox_with_unread_message_reports_count() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inbox");
        fs::write(&path, format!("{}{}", READ_MESSAGE, UNREAD_MESSAGE)).unwrap();

        let report = check_mailbox(&path, &[]).unwrap();
        assert_eq!(report, MailReport::NewMail(vec![("inbox".to_string(), 1)]));
    }

    #[test]
    fn test_mbox_with_only_read_messages_is_no_mail() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inbox");
        fs::write(&path, READ_MESSAGE).unwrap();

        assert_eq!(check_mailbox(&path, &[]).unwrap(), MailReport::NoMail);
    }

    #[test]
    fn test_non_mbox_file_is_not_a_mailbox() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "shopping list\n").unwrap();

        let report = check_mailbox(&path, &[]).unwrap();
        assert_eq!(report, MailReport::NotAMailbox(path));
    }

    #[test]
    fn test_maildir_counts_new_messages_per_folder() {
        let dir = TempDir::new().unwrap();
        for folder in ["inbox", "lists"] {
            for sub in ["new", "cur", "tmp"] {
                fs::create_dir_all(dir.path().join(folder).join(sub)).unwrap();
            }
        }
        fs::write(dir.path().join("inbox/new/msg1"), "x").unwrap();
        fs::write(dir.path().join("inbox/new/msg2"), "x").unwrap();
        fs::write(dir.path().join("lists/new/msg1"), "x").unwrap();

        let report = check_mailbox(dir.path(), &[]).unwrap();
        assert_eq!(
            report,
            MailReport::NewMail(vec![
                ("inbox".to_string(), 2),
                ("lists".to_string(), 1),
            ])
        );
    }

    #[test]
    fn test_maildir_ignore_list_skips_folders() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("spam/new")).unwrap();
        fs::write(dir.path().join("spam/new/msg1"), "x").unwrap();

        let report = check_mailbox(dir.path(), &["spam".to_string()]).unwrap();
        assert_eq!(report, MailReport::NoMail);
    }

    #[test]
    fn test_directory_without_maildirs_is_not_a_mailbox() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("random")).unwrap();

        let report = check_mailbox(dir.path(), &[]).unwrap();
        assert_eq!(report, MailReport::NotAMailbox(dir.path().to_path_buf()));
    }

    #[test]
    fn test_maildir_with_empty_new_is_no_mail() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("inbox/new")).unwrap();

        assert_eq!(check_mailbox(dir.path(), &[]).unwrap(), MailReport::NoMail);
    }

    #[test]
    fn test_render_no_mail_uses_placeholder() {
        assert_eq!(MailReport::NoMail.render("no mail"), "no mail");
        assert_eq!(MailReport::NoMail.render(""), "");
    }

    #[test]
    fn test_render_new_mail_joins_folders() {
        let report =
            MailReport::NewMail(vec![("inbox".to_string(), 2), ("lists".to_string(), 1)]);
        assert_eq!(report.render(""), "inbox:2 lists:1");
    }

    #[test]
    fn test_color_per_outcome() {
        let colors = MailColors::default();
        assert_eq!(MailReport::NoMail.color(&colors), "#00FF00");
        assert_eq!(
            MailReport::NewMail(vec![("inbox".to_string(), 1)]).color(&colors),
            "#FFFF00"
        );
        assert_eq!(
            MailReport::NotAMailbox(PathBuf::from("/x")).color(&colors),
            "#FF0000"
        );
    }

    #[test]
    fn test_resolve_mailbox_keeps_absolute_paths() {
        assert_eq!(
            resolve_mailbox("/var/mail/me"),
            PathBuf::from("/var/mail/me")
        );
    }
}
