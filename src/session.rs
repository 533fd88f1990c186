use crate::dirmap::DirectoryMap;
use crate::env::Environment;
use crate::store::DataFile;

/// Everything a shell command may look at or change.
///
/// One session per opened file. The directory map is built when the session
/// is created and never changes afterwards; `cd` and `exit` only touch
/// [`Environment`].
pub struct Session {
    pub env: Environment,
    pub map: DirectoryMap,
    file_name: String,
    file: Box<dyn DataFile>,
}

impl Session {
    pub fn new(file_name: impl Into<String>, file: Box<dyn DataFile>) -> Self {
        let map = DirectoryMap::build(file.root());
        Self {
            env: Environment::new(),
            map,
            file_name: file_name.into(),
            file,
        }
    }

    pub fn file(&self) -> &dyn DataFile {
        self.file.as_ref()
    }

    /// `<file>:<current dir>> `
    pub fn prompt(&self) -> String {
        format!("{}:{}> ", self.file_name, self.env.current_dir)
    }
}
