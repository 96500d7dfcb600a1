use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Write;
use std::path::PathBuf;

/// One project of a build, with its tasks and sub-projects.
///
/// The tree is produced by the builder driver and treated as an immutable
/// value everywhere else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectView {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tasks: Vec<TaskView>,
    #[serde(default, rename = "subprojects")]
    pub sub_projects: Vec<ProjectView>,
    #[serde(default)]
    pub classpath: Vec<ClasspathEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskView {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClasspathEntry {
    pub kind: ClasspathKind,
    pub path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClasspathKind {
    Library,
    Project,
    Source,
    Output,
}

impl ProjectView {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_task(mut self, name: impl Into<String>, description: Option<&str>) -> Self {
        self.tasks.push(TaskView {
            name: name.into(),
            description: description.map(|d| d.to_string()),
            is_default: false,
        });
        self
    }

    pub fn with_sub_project(mut self, project: ProjectView) -> Self {
        self.sub_projects.push(project);
        self
    }

    pub fn with_classpath_entry(mut self, kind: ClasspathKind, path: impl Into<PathBuf>) -> Self {
        self.classpath.push(ClasspathEntry {
            kind,
            path: path.into(),
            source_path: None,
        });
        self
    }

    /// Depth-first walk over this project and every sub-project
    pub fn walk(&self) -> Vec<&ProjectView> {
        let mut out = vec![self];
        for child in &self.sub_projects {
            out.extend(child.walk());
        }
        out
    }

    pub fn task_count(&self) -> usize {
        self.walk().iter().map(|p| p.tasks.len()).sum()
    }

    /// Find a project by its colon-separated path, e.g. `:core:api`
    pub fn find_project(&self, path: &str) -> Option<&ProjectView> {
        let mut current = self;
        for segment in path.split(':').filter(|s| !s.is_empty()) {
            current = current.sub_projects.iter().find(|p| p.name == segment)?;
        }
        Some(current)
    }

    /// Classpath entries of the whole tree, first occurrence wins
    pub fn classpath_entries(&self) -> Vec<ClasspathEntry> {
        let mut seen = HashSet::new();
        self.walk()
            .into_iter()
            .flat_map(|p| p.classpath.iter())
            .filter(|entry| seen.insert((*entry).clone()))
            .cloned()
            .collect()
    }

    /// Render the project/task tree as indented text
    pub fn render_tree(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        let _ = writeln!(out, "{indent}{}", self.name);
        for task in &self.tasks {
            let marker = if task.is_default { " (default)" } else { "" };
            match &task.description {
                Some(desc) => {
                    let _ = writeln!(out, "{indent}  - {}{marker}: {desc}", task.name);
                }
                None => {
                    let _ = writeln!(out, "{indent}  - {}{marker}", task.name);
                }
            }
        }
        for child in &self.sub_projects {
            child.render_into(out, depth + 1);
        }
    }
}
