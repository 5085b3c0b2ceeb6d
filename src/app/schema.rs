//! Typed parsing of untrusted request input.
//!
//! Shape problems are reported here, before the validator sees the cube.

use crate::domain::model::{CubeState, Sticker, FACE_COUNT, FACE_SIZE};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

pub const DEFAULT_HISTORY_LIMIT: u32 = 50;
pub const MAX_HISTORY_LIMIT: u32 = 100;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Invalid JSON in request body")]
    MalformedJson,

    #[error("Invalid request body: {field}: {message}")]
    Field { field: String, message: String },

    #[error("Invalid limit or offset parameter")]
    InvalidPagination,
}

fn field_error(field: impl Into<String>, message: impl Into<String>) -> SchemaError {
    SchemaError::Field {
        field: field.into(),
        message: message.into(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubeRequest {
    pub cube: CubeState,
}

pub fn parse_cube_request(body: &[u8]) -> Result<CubeRequest, SchemaError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| SchemaError::MalformedJson)?;
    let object = value
        .as_object()
        .ok_or_else(|| field_error("body", "expected a JSON object"))?;
    let cube = object
        .get("cube")
        .ok_or_else(|| field_error("cube", "field required"))?;

    let mut faces = Vec::with_capacity(FACE_COUNT);
    for (i, face) in expect_array(cube, "cube", FACE_COUNT, "faces")?.iter().enumerate() {
        let mut rows = Vec::with_capacity(FACE_SIZE);
        for (j, row) in expect_array(face, &format!("cube[{i}]"), FACE_SIZE, "rows")?
            .iter()
            .enumerate()
        {
            let cells = expect_array(row, &format!("cube[{i}][{j}]"), FACE_SIZE, "cells")?
                .iter()
                .enumerate()
                .map(|(k, cell)| {
                    cell.as_i64()
                        .map(Sticker::from)
                        .or_else(|| cell.as_u64().map(Sticker::from))
                        .ok_or_else(|| field_error(format!("cube[{i}][{j}][{k}]"), "expected an integer"))
                })
                .collect::<Result<Vec<Sticker>, SchemaError>>()?;
            rows.push(cells);
        }
        faces.push(rows);
    }

    Ok(CubeRequest {
        cube: CubeState::from_raw(faces),
    })
}

fn expect_array<'a>(
    value: &'a Value,
    field: &str,
    len: usize,
    items: &str,
) -> Result<&'a Vec<Value>, SchemaError> {
    let array = value
        .as_array()
        .ok_or_else(|| field_error(field, "expected an array"))?;
    if array.len() != len {
        return Err(field_error(
            field,
            format!("expected {} {}, found {}", len, items, array.len()),
        ));
    }
    Ok(array)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryQuery {
    pub limit: u32,
    pub offset: u32,
}

/// Missing values take defaults; `limit` is clamped to [`MAX_HISTORY_LIMIT`].
pub fn parse_history_query(query: &HashMap<String, String>) -> Result<HistoryQuery, SchemaError> {
    let parse = |name: &str, default: u32| -> Result<u32, SchemaError> {
        match query.get(name) {
            None => Ok(default),
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(|value| u32::try_from(value).unwrap_or(u32::MAX))
                .map_err(|_| SchemaError::InvalidPagination),
        }
    };

    Ok(HistoryQuery {
        limit: parse("limit", DEFAULT_HISTORY_LIMIT)?.min(MAX_HISTORY_LIMIT),
        offset: parse("offset", 0)?,
    })
}
