use roottools::Interpreter;
use roottools::dump::{self, DumpOptions};
use roottools::literal::Binning;
use roottools::store::{DataFile, JsonFile, ObjectKind};
use std::path::PathBuf;

const DOC: &str = r#"{
    "type": "directory", "name": "",
    "children": [
        { "type": "directory", "name": "muons", "title": "muon plots", "children": [
            { "type": "hist1d", "name": "pt", "title": "p_{T}",
              "axis": { "bins": 4, "min": 0, "max": 40 },
              "contents": [1, 10, 20, 30, 40, 2] },
            { "type": "hist2d", "name": "eta_phi", "title": "occupancy",
              "x_axis": { "edges": [-1, 0, 1] }, "y_axis": { "edges": [0, 3] },
              "contents": [0, 0, 0, 0, 0, 1, 2, 0, 0, 0, 0, 0] }
        ] },
        { "type": "tree", "name": "events", "title": "selected events", "entries": 12 },
        { "type": "object", "name": "config", "class": "TNamed" }
    ]
}"#;

fn write_doc(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("roottools-{}-{name}.json", std::process::id()));
    std::fs::write(&path, DOC).unwrap();
    path
}

fn run(sh: &mut Interpreter, line: &str) -> (i32, String) {
    let mut out = Vec::new();
    let code = sh.execute_line(line, &mut out).unwrap();
    (code, String::from_utf8(out).unwrap())
}

#[test]
fn test_session_over_a_file() {
    let path = write_doc("session");
    let file = JsonFile::open(&path).unwrap();
    assert_eq!(file.path(), path.as_path());
    assert_eq!(file.root().children().len(), 3);
    assert_eq!(file.get("muons/pt").unwrap().kind(), ObjectKind::Histogram);

    let mut sh = Interpreter::new("data.json", Box::new(file));
    assert_eq!(run(&mut sh, "ls --no-colors"), (0, "config\nevents\nmuons\n\n".into()));

    let (code, out) = run(&mut sh, "ls -l --no-colors events");
    assert_eq!(code, 0);
    assert_eq!(
        out,
        format!("{:>30}{:>30}       {}\n\n", "TTree", "events", "selected events")
    );

    assert_eq!(run(&mut sh, "cd muons"), (0, String::new()));
    assert_eq!(sh.prompt(), "data.json:muons> ");
    assert_eq!(run(&mut sh, "ls --no-colors"), (0, "eta_phi\npt\n\n".into()));
    assert_eq!(run(&mut sh, "ls --no-colors ../e*"), (0, "../events\n\n".into()));

    assert_eq!(run(&mut sh, "cd pt"), (2, "cd: pt: Not a directory\n".into()));
    assert_eq!(run(&mut sh, "cd /nowhere"), (1, "cd: /nowhere: No such object\n".into()));
    assert_eq!(sh.session().env.current_dir, "muons");

    assert_eq!(run(&mut sh, "find / --type h"), (0, "/muons/pt\n/muons/eta_phi\n".into()));
    assert_eq!(run(&mut sh, "find .. --name e*"), (0, "../muons/eta_phi\n../events\n".into()));

    assert_eq!(run(&mut sh, "cd"), (0, String::new()));
    assert_eq!(sh.session().env.current_dir, "");
    assert_eq!(run(&mut sh, "frobnicate"), (0, String::new()));

    let (code, out) = run(&mut sh, "find --type q");
    assert_eq!(code, 1);
    assert!(out.contains("unknown type `q`"));

    run(&mut sh, "exit");
    assert!(sh.session().env.should_exit);

    std::fs::remove_file(path).unwrap();
}

#[test]
fn test_dump_from_disk() {
    let path = write_doc("dump");
    let file = JsonFile::open(&path).unwrap();

    let opts = DumpOptions {
        rebin: Some(Binning::Factor(2)),
        ..Default::default()
    };
    let mut out = Vec::new();
    dump::dump(&file, "muons/pt", &opts, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "   1.0   |   30.0  |   70.0  |   2.0   ");
    assert_eq!(lines[1], "=".repeat(lines[0].len()));
    assert_eq!(lines[2], "  uflow  |   10.0  |   30.0  |  oflow  ");

    let opts = DumpOptions {
        project: Some("y".parse().unwrap()),
        ..Default::default()
    };
    let mut out = Vec::new();
    dump::dump(&file, "muons/eta_phi", &opts, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().next().unwrap(), "    0    |   3.0   |    0    ");

    let missing = JsonFile::open(path.with_extension("missing"));
    assert!(missing.is_err());

    std::fs::remove_file(path).unwrap();
}
