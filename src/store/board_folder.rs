// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Storymap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Storymap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::model::{
    BoardId, BoardRecord, Edge, EdgeId, IdError, Orientation, Point, Section, SectionId, Task,
    TaskId,
};

use super::document::{BoardSnapshot, LoadState};

const BOARD_FILENAME: &str = "storymap-board.json";

/// Whether writes fsync file and directory before returning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    Fast,
    Durable,
}

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidId {
        field: &'static str,
        value: String,
        source: Box<IdError>,
    },
    SymlinkRefused {
        path: PathBuf,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {}: {source}", path.display()),
            Self::Json { path, source } => {
                write!(f, "invalid board json at {}: {source}", path.display())
            }
            Self::InvalidId { field, value, source } => {
                write!(f, "invalid id in field '{field}' ('{value}'): {source}")
            }
            Self::SymlinkRefused { path } => {
                write!(f, "refusing to write through symlink at {}", path.display())
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidId { source, .. } => Some(source.as_ref()),
            Self::SymlinkRefused { .. } => None,
        }
    }
}

/// On-disk persistence for one board: a folder holding a single pretty-printed
/// JSON snapshot, written atomically (temp file + rename).
#[derive(Debug, Clone)]
pub struct BoardFolder {
    root: PathBuf,
    durability: WriteDurability,
}

impl BoardFolder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            durability: WriteDurability::Fast,
        }
    }

    pub fn with_durability(root: impl Into<PathBuf>, durability: WriteDurability) -> Self {
        Self {
            root: root.into(),
            durability,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn board_path(&self) -> PathBuf {
        self.root.join(BOARD_FILENAME)
    }

    pub fn save(&self, snapshot: &BoardSnapshot) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;

        let board_path = self.board_path();
        let json = board_to_json(snapshot);
        let text = serde_json::to_string_pretty(&json).map_err(|source| StoreError::Json {
            path: board_path.clone(),
            source,
        })?;

        write_atomic(&board_path, format!("{text}\n").as_bytes(), self.durability)
    }

    /// Loads the persisted snapshot. A missing board file resolves to
    /// `Loading` (the board has not been written yet); only unreadable or
    /// malformed content is an error.
    pub fn load(&self) -> Result<LoadState<BoardSnapshot>, StoreError> {
        let board_path = self.board_path();
        let text = match fs::read_to_string(&board_path) {
            Ok(text) => text,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                return Ok(LoadState::Loading);
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: board_path,
                    source,
                });
            }
        };

        let json: BoardFileJson =
            serde_json::from_str(&text).map_err(|source| StoreError::Json {
                path: board_path.clone(),
                source,
            })?;

        Ok(LoadState::Ready(board_from_json(json)?))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BoardFileJson {
    board_id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    owner: String,
    #[serde(default)]
    x_order: Vec<String>,
    #[serde(default)]
    y_order: Vec<String>,
    #[serde(default)]
    sections_x: Vec<SectionJson>,
    #[serde(default)]
    sections_y: Vec<SectionJson>,
    #[serde(default)]
    tasks: Vec<TaskJson>,
    #[serde(default)]
    edges: Vec<EdgeJson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SectionJson {
    section_id: String,
    name: String,
    orientation: OrientationJson,
    size: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum OrientationJson {
    Horizontal,
    Vertical,
}

impl From<Orientation> for OrientationJson {
    fn from(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Horizontal => Self::Horizontal,
            Orientation::Vertical => Self::Vertical,
        }
    }
}

impl From<OrientationJson> for Orientation {
    fn from(orientation: OrientationJson) -> Self {
        match orientation {
            OrientationJson::Horizontal => Self::Horizontal,
            OrientationJson::Vertical => Self::Vertical,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TaskJson {
    task_id: String,
    x: f64,
    y: f64,
    #[serde(default)]
    section_x: Option<String>,
    #[serde(default)]
    section_y: Option<String>,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    estimate: u32,
    #[serde(default)]
    link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct EdgeJson {
    edge_id: String,
    source_task_id: String,
    target_task_id: String,
    break_x: f64,
}

fn board_to_json(snapshot: &BoardSnapshot) -> BoardFileJson {
    let board = &snapshot.board;
    BoardFileJson {
        board_id: board.board_id().to_string(),
        title: board.title().to_owned(),
        description: board.description().to_owned(),
        owner: board.owner().to_owned(),
        x_order: board
            .order(Orientation::Vertical)
            .iter()
            .map(ToString::to_string)
            .collect(),
        y_order: board
            .order(Orientation::Horizontal)
            .iter()
            .map(ToString::to_string)
            .collect(),
        sections_x: snapshot.sections_x.iter().map(section_to_json).collect(),
        sections_y: snapshot.sections_y.iter().map(section_to_json).collect(),
        tasks: snapshot.tasks.iter().map(task_to_json).collect(),
        edges: snapshot.edges.iter().map(edge_to_json).collect(),
    }
}

fn section_to_json(section: &Section) -> SectionJson {
    SectionJson {
        section_id: section.section_id().to_string(),
        name: section.name().to_owned(),
        orientation: section.orientation().into(),
        size: section.size(),
    }
}

fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        task_id: task.task_id().to_string(),
        x: task.position().x,
        y: task.position().y,
        section_x: task.section_x().map(ToString::to_string),
        section_y: task.section_y().map(ToString::to_string),
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        estimate: task.estimate(),
        link: task.link().map(ToOwned::to_owned),
    }
}

fn edge_to_json(edge: &Edge) -> EdgeJson {
    EdgeJson {
        edge_id: edge.edge_id().to_string(),
        source_task_id: edge.source_task_id().to_string(),
        target_task_id: edge.target_task_id().to_string(),
        break_x: edge.break_x(),
    }
}

fn parse_id<T>(field: &'static str, raw: String) -> Result<crate::model::Id<T>, StoreError> {
    crate::model::Id::new(raw.clone()).map_err(|source| StoreError::InvalidId {
        field,
        value: raw,
        source: Box::new(source),
    })
}

fn parse_opt_id<T>(
    field: &'static str,
    raw: Option<String>,
) -> Result<Option<crate::model::Id<T>>, StoreError> {
    raw.map(|raw| parse_id(field, raw)).transpose()
}

fn board_from_json(json: BoardFileJson) -> Result<BoardSnapshot, StoreError> {
    let board_id: BoardId = parse_id("board_id", json.board_id)?;
    let mut board = BoardRecord::new(board_id, json.title, json.owner);
    board.set_description(json.description);
    board.set_order(
        Orientation::Vertical,
        json.x_order
            .into_iter()
            .map(|raw| parse_id("x_order", raw))
            .collect::<Result<Vec<SectionId>, _>>()?,
    );
    board.set_order(
        Orientation::Horizontal,
        json.y_order
            .into_iter()
            .map(|raw| parse_id("y_order", raw))
            .collect::<Result<Vec<SectionId>, _>>()?,
    );

    let sections_x = json
        .sections_x
        .into_iter()
        .map(section_from_json)
        .collect::<Result<Vec<_>, _>>()?;
    let sections_y = json
        .sections_y
        .into_iter()
        .map(section_from_json)
        .collect::<Result<Vec<_>, _>>()?;
    let tasks = json
        .tasks
        .into_iter()
        .map(task_from_json)
        .collect::<Result<Vec<_>, _>>()?;
    let edges = json
        .edges
        .into_iter()
        .map(edge_from_json)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(BoardSnapshot {
        board,
        sections_x,
        sections_y,
        tasks,
        edges,
        rev: 0,
    })
}

fn section_from_json(json: SectionJson) -> Result<Section, StoreError> {
    let section_id: SectionId = parse_id("section_id", json.section_id)?;
    Ok(Section::new(
        section_id,
        json.name,
        json.orientation.into(),
        json.size,
    ))
}

fn task_from_json(json: TaskJson) -> Result<Task, StoreError> {
    let task_id: TaskId = parse_id("task_id", json.task_id)?;
    let mut task = Task::new(task_id, Point::new(json.x, json.y), json.title);
    task.set_section_x(parse_opt_id("section_x", json.section_x)?);
    task.set_section_y(parse_opt_id("section_y", json.section_y)?);
    task.set_description(json.description);
    task.set_estimate(json.estimate);
    task.set_link(json.link);
    Ok(task)
}

fn edge_from_json(json: EdgeJson) -> Result<Edge, StoreError> {
    let edge_id: EdgeId = parse_id("edge_id", json.edge_id)?;
    let source: TaskId = parse_id("source_task_id", json.source_task_id)?;
    let target: TaskId = parse_id("target_task_id", json.target_task_id)?;
    Ok(Edge::new(edge_id, source, target, json.break_x))
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::remove_file(to) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err),
        }
        fs::rename(from, to)
    }
    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

fn write_atomic(path: &Path, contents: &[u8], durability: WriteDurability) -> Result<(), StoreError> {
    match fs::symlink_metadata(path) {
        Ok(md) if md.file_type().is_symlink() => {
            return Err(StoreError::SymlinkRefused {
                path: path.to_path_buf(),
            });
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    }

    let Some(parent) = path.parent() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::Other, "path has no parent"),
        });
    };
    let Some(file_name) = path.file_name() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::Other, "path has no file name"),
        });
    };

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_path = parent.join(format!(
        ".storymap.tmp.{}.{}",
        file_name.to_string_lossy(),
        nanos
    ));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;

    file.write_all(contents).map_err(|source| StoreError::Io {
        path: tmp_path.clone(),
        source,
    })?;

    if durability == WriteDurability::Durable {
        file.sync_all().map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;
    }
    drop(file);

    if let Err(source) = rename_overwrite(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir = fs::File::open(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
            dir.sync_all().map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
