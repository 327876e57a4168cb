//! Total lookups over decoded records. Paths are JSON pointers ("/user/screen_name").

use crate::error::{PrepError, PrepResult};
use serde_json::Value;

/// Value at `ptr`, treating an explicit `null` the same as an absent key.
pub fn lookup<'a>(v: &'a Value, ptr: &str) -> Option<&'a Value> {
    v.pointer(ptr).filter(|x| !x.is_null())
}

/// First non-null value among `ptrs`, tried in order.
pub fn first_of<'a>(v: &'a Value, ptrs: &[&str]) -> Option<&'a Value> {
    ptrs.iter().find_map(|p| lookup(v, p))
}

/// String at `ptr`, if the value there is a string.
pub fn str_at<'a>(v: &'a Value, ptr: &str) -> Option<&'a str> {
    lookup(v, ptr).and_then(|x| x.as_str())
}

/// Strict variant of [`lookup`] for callers that want absence to be an error.
pub fn require<'a>(v: &'a Value, ptr: &str) -> PrepResult<&'a Value> {
    lookup(v, ptr).ok_or_else(|| PrepError::KeyLookup { path: ptr.to_string() })
}
