use crate::command::{BuiltinCommand, ExitCode};
use crate::dirmap::{self, DirectoryEntry};
use crate::glob;
use crate::path;
use crate::session::Session;
use crate::store::{DataObject, ObjectKind};
use anyhow::{Context, Result};
use argh::FromArgs;
use std::io::Write;

#[derive(FromArgs)]
/// list information about the OBJECTs (the current directory by default).
pub struct Ls {
    #[argh(switch)]
    /// do not color names by object type.
    pub no_colors: bool,

    #[argh(switch, short = 'l')]
    /// use a long listing format.
    pub long: bool,

    #[argh(positional)]
    /// objects to list; wildcards are allowed.
    pub pattern: Option<String>,
}

impl Ls {
    fn write_entry(
        &self,
        stdout: &mut dyn Write,
        entry: &DirectoryEntry,
        shown: &str,
    ) -> std::io::Result<()> {
        let name = entry.paint(shown, !self.no_colors);
        if self.long {
            writeln!(
                stdout,
                "{:>30}{:>30}       {}",
                entry.class_name, name, entry.title
            )
        } else {
            writeln!(stdout, "{name}")
        }
    }
}

impl BuiltinCommand for Ls {
    fn execute(self, stdout: &mut dyn Write, session: &mut Session) -> Result<ExitCode> {
        let cwd = &session.env.current_dir;
        let requested = self.pattern.as_deref().unwrap_or("*");
        let mut pattern = path::join(cwd, requested);
        if pattern.is_empty() {
            pattern = "*".to_string();
        } else if session.map.is_dir(&pattern) {
            pattern.push_str("/*");
        }
        tracing::debug!(pattern = %pattern, "ls");

        let regex = glob::compile(&pattern)
            .with_context(|| format!("ls: invalid pattern `{requested}`"))?;
        for (found, entry) in session.map.matching(&regex) {
            self.write_entry(stdout, entry, &path::relativize(cwd, found))?;
        }
        writeln!(stdout)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// change the current directory.
/// without a target, goes back to the top of the file.
pub struct Cd {
    #[argh(positional)]
    /// directory to switch to; absolute or relative to the current directory.
    pub target: Option<String>,
}

impl BuiltinCommand for Cd {
    fn execute(self, stdout: &mut dyn Write, session: &mut Session) -> Result<ExitCode> {
        let target = self.target.as_deref().unwrap_or("/");
        let resolved = path::join(&session.env.current_dir, target);
        if session.map.is_dir(&resolved) {
            session.env.current_dir = resolved;
            return Ok(0);
        }
        if session.map.get(&resolved).is_some() {
            writeln!(stdout, "cd: {target}: Not a directory")?;
            Ok(2)
        } else {
            writeln!(stdout, "cd: {target}: No such object")?;
            Ok(1)
        }
    }
}

fn parse_kind(value: &str) -> Result<ObjectKind, String> {
    [
        ObjectKind::Histogram,
        ObjectKind::Tree,
        ObjectKind::Directory,
        ObjectKind::Other,
    ]
    .into_iter()
    .find(|kind| value.len() == 1 && value.starts_with(kind.code()))
    .ok_or_else(|| format!("unknown type `{value}`, expected one of h, t, d, o"))
}

#[derive(FromArgs)]
/// search for objects below a directory.
pub struct Find {
    #[argh(positional)]
    /// where to start searching (the current directory by default).
    pub start: Option<String>,

    #[argh(option)]
    /// only report objects whose name matches this wildcard pattern.
    pub name: Option<String>,

    #[argh(option, long = "type", from_str_fn(parse_kind))]
    /// only report objects of this type: h(istogram), t(ree), d(irectory) or o(ther).
    pub kind: Option<ObjectKind>,
}

impl Find {
    fn accepts(&self, name_pattern: Option<&regex::Regex>, object: &dyn DataObject) -> bool {
        self.kind.is_none_or(|kind| kind == object.kind())
            && name_pattern.is_none_or(|re| re.is_match(object.name()))
    }
}

impl BuiltinCommand for Find {
    fn execute(self, stdout: &mut dyn Write, session: &mut Session) -> Result<ExitCode> {
        let shown = self.start.clone().unwrap_or_else(|| ".".to_string());
        let resolved = path::join(&session.env.current_dir, &shown);
        let Some(start) = session.file().get(&resolved) else {
            writeln!(stdout, "find: {shown}: No such object")?;
            return Ok(1);
        };
        let name_pattern = self
            .name
            .as_deref()
            .map(glob::compile)
            .transpose()
            .context("find: invalid --name pattern")?;

        let prefix = match shown.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        let display = |below: &str| match prefix {
            "/" => format!("/{below}"),
            _ => format!("{prefix}/{below}"),
        };
        let mut found = Vec::new();
        if self.accepts(name_pattern.as_ref(), start) {
            found.push(prefix.to_string());
        }
        dirmap::walk(start, "", &mut |below: &str, object: &dyn DataObject| {
            if self.accepts(name_pattern.as_ref(), object) {
                found.push(display(below));
            }
        });
        for line in found {
            writeln!(stdout, "{line}")?;
        }
        Ok(0)
    }
}

#[derive(FromArgs)]
/// leave the shell.
pub struct Exit {
    #[argh(positional, greedy)]
    /// ignored.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Exit {
    fn execute(self, _stdout: &mut dyn Write, session: &mut Session) -> Result<ExitCode> {
        session.env.should_exit = true;
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::JsonFile;

    const DOC: &str = r#"{
        "type": "directory", "name": "",
        "children": [
            { "type": "hist1d", "name": "a", "title": "alpha",
              "axis": { "edges": [0, 1] }, "contents": [0, 1, 0] },
            { "type": "directory", "name": "b", "title": "beta", "children": [
                { "type": "tree", "name": "t", "title": "events" },
                { "type": "hist1d", "name": "h2", "class": "TH1F",
                  "axis": { "edges": [0, 1] }, "contents": [0, 1, 0] }
            ] }
        ]
    }"#;

    fn session() -> Session {
        Session::new("test.json", Box::new(JsonFile::from_json(DOC).unwrap()))
    }

    fn run<T: BuiltinCommand>(cmd: T, session: &mut Session) -> (ExitCode, String) {
        let mut out = Vec::new();
        let code = cmd.execute(&mut out, session).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    fn ls(pattern: Option<&str>, no_colors: bool, long: bool) -> Ls {
        Ls {
            no_colors,
            long,
            pattern: pattern.map(str::to_string),
        }
    }

    #[test]
    fn test_ls_plain_lists_current_dir() {
        let mut s = session();
        let (code, out) = run(ls(None, true, false), &mut s);
        assert_eq!(code, 0);
        assert_eq!(out, "a\nb\n\n");
    }

    #[test]
    fn test_ls_colors_by_kind() {
        let mut s = session();
        let (_, out) = run(ls(Some("*"), false, false), &mut s);
        assert_eq!(out, "\x1b[91ma\x1b[0m\n\x1b[94mb\x1b[0m\n\n");
    }

    #[test]
    fn test_ls_directory_lists_children() {
        let mut s = session();
        let (_, out) = run(ls(Some("b"), true, false), &mut s);
        assert_eq!(out, "b/h2\nb/t\n\n");
    }

    #[test]
    fn test_ls_relative_to_current_dir() {
        let mut s = session();
        s.env.current_dir = "b".to_string();
        let (_, out) = run(ls(None, true, false), &mut s);
        assert_eq!(out, "h2\nt\n\n");
        let (_, out) = run(ls(Some("../*"), true, false), &mut s);
        assert_eq!(out, "../a\n../b\n\n");
    }

    #[test]
    fn test_ls_long_format() {
        let mut s = session();
        let (_, out) = run(ls(Some("b/t"), true, true), &mut s);
        let expected = format!("{:>30}{:>30}       {}\n\n", "TTree", "b/t", "events");
        assert_eq!(out, expected);
    }

    #[test]
    fn test_ls_wildcards() {
        let mut s = session();
        let (_, out) = run(ls(Some("*/h?"), true, false), &mut s);
        assert_eq!(out, "b/h2\n\n");
        let (_, out) = run(ls(Some("nothing*"), true, false), &mut s);
        assert_eq!(out, "\n");
    }

    #[test]
    fn test_cd_into_directory_and_back() {
        let mut s = session();
        let (code, out) = run(Cd { target: Some("b".into()) }, &mut s);
        assert_eq!((code, out.as_str()), (0, ""));
        assert_eq!(s.env.current_dir, "b");

        run(Cd { target: Some("..".into()) }, &mut s);
        assert_eq!(s.env.current_dir, "");

        run(Cd { target: Some("b".into()) }, &mut s);
        run(Cd { target: None }, &mut s);
        assert_eq!(s.env.current_dir, "");
    }

    #[test]
    fn test_cd_into_histogram_fails() {
        let mut s = session();
        let (code, out) = run(Cd { target: Some("a".into()) }, &mut s);
        assert_eq!(code, 2);
        assert_eq!(out, "cd: a: Not a directory\n");
        assert_eq!(s.env.current_dir, "");
    }

    #[test]
    fn test_cd_missing_fails() {
        let mut s = session();
        s.env.current_dir = "b".to_string();
        let (code, out) = run(Cd { target: Some("nope".into()) }, &mut s);
        assert_eq!(code, 1);
        assert_eq!(out, "cd: nope: No such object\n");
        assert_eq!(s.env.current_dir, "b");
    }

    #[test]
    fn test_find_everything() {
        let mut s = session();
        let find = Find {
            start: None,
            name: None,
            kind: None,
        };
        let (code, out) = run(find, &mut s);
        assert_eq!(code, 0);
        assert_eq!(out, ".\n./a\n./b\n./b/t\n./b/h2\n");
    }

    #[test]
    fn test_find_filters() {
        let mut s = session();
        let find = Find {
            start: Some("b/".into()),
            name: Some("h*".into()),
            kind: Some(ObjectKind::Histogram),
        };
        let (_, out) = run(find, &mut s);
        assert_eq!(out, "b/h2\n");

        let find = Find {
            start: None,
            name: None,
            kind: Some(ObjectKind::Directory),
        };
        let (_, out) = run(find, &mut s);
        assert_eq!(out, ".\n./b\n");
    }

    #[test]
    fn test_find_missing_start() {
        let mut s = session();
        let find = Find {
            start: Some("zzz".into()),
            name: None,
            kind: None,
        };
        let (code, out) = run(find, &mut s);
        assert_eq!(code, 1);
        assert_eq!(out, "find: zzz: No such object\n");
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("d"), Ok(ObjectKind::Directory));
        assert!(parse_kind("x").is_err());
    }
}
