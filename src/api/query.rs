//! GraphQL query text, built once per recursion depth.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use lazy_static::lazy_static;

lazy_static! {
    static ref RECURSIVE_QUERIES: Mutex<HashMap<u32, Arc<str>>> = Mutex::new(HashMap::new());
    static ref DISKSPACE_QUERY: Arc<str> = Arc::from(
        "query GetDiskspace($owner: String!, $repo: String!) { \
         repository(owner: $owner, name: $repo) { diskUsage } }"
    );
}

const QUERY_HEAD: &str = "query GetSubdirContents($owner: String!, $repo: String!, $branch_colon_path: String!) { \
     repository(owner: $owner, name: $repo) { name object(expression: $branch_colon_path) {";
const QUERY_TAIL: &str = " } } }";
const TREE_OPEN: &str = " ... on Tree { entries { name object { ... on Blob { byteSize }";
const TREE_CLOSE: &str = " } } }";

/// Query listing the entries under `branch:path`, nesting `depth` levels of
/// `... on Tree { entries { ... } }`. A depth of `0` is built as `1`.
///
/// The same depth always returns the same shared string.
pub fn create_recursive_query(depth: u32) -> Arc<str> {
    let depth = depth.max(1);
    let mut cache = RECURSIVE_QUERIES
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    cache
        .entry(depth)
        .or_insert_with(|| Arc::from(build_recursive_query(depth)))
        .clone()
}

fn build_recursive_query(depth: u32) -> String {
    let depth = depth as usize;
    let mut query = String::with_capacity(
        QUERY_HEAD.len() + QUERY_TAIL.len() + depth * (TREE_OPEN.len() + TREE_CLOSE.len()),
    );
    query.push_str(QUERY_HEAD);
    query.push_str(&TREE_OPEN.repeat(depth));
    query.push_str(&TREE_CLOSE.repeat(depth));
    query.push_str(QUERY_TAIL);
    query
}

pub fn create_diskspace_query() -> Arc<str> {
    DISKSPACE_QUERY.clone()
}
