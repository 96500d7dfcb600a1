//! Host project whose classpath is derived from the build

use crate::{error::Result, types::ClasspathEntry};

pub trait ClasspathProject: Send + Sync {
    fn name(&self) -> &str;

    /// Replace every classpath entry of the project with `entries`
    fn replace_classpath(&self, entries: Vec<ClasspathEntry>) -> Result<()>;
}
