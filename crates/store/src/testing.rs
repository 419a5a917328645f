// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory GitHub for tests.
//!
//! [`FakeGitHub`] implements [`Transport`] over a small model of the REST
//! endpoints the store uses: user, repository listing and creation, and the
//! contents API with the same SHA guards GitHub applies to writes. Every
//! request is logged, and failures can be injected per method.

use std::collections::{BTreeMap, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use crate::transport::{ApiRequest, ApiResponse, Method, Transport, TransportError, TransportResult};

/// A request as the fake received it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl RecordedRequest {
    /// `sha` field of a write body, if any.
    pub fn sha(&self) -> Option<&str> {
        self.body.as_ref()?.get("sha")?.as_str()
    }

    /// Decoded `content` of a PUT body.
    pub fn content_json(&self) -> Option<Value> {
        let encoded = self.body.as_ref()?.get("content")?.as_str()?;
        let bytes = STANDARD.decode(encoded).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

#[derive(Debug, Clone)]
enum FaultKind {
    Status(u16, String),
    Disconnect,
}

#[derive(Debug, Clone)]
struct Fault {
    method: Method,
    path_contains: Option<String>,
    kind: FaultKind,
}

#[derive(Debug, Clone)]
struct FakeFile {
    sha: String,
    bytes: Vec<u8>,
}

#[derive(Debug, Default)]
struct FakeRepo {
    private: bool,
    files: BTreeMap<String, FakeFile>,
}

#[derive(Debug, Default)]
struct FakeState {
    login: String,
    token: Option<String>,
    repos: BTreeMap<String, FakeRepo>,
    log: Vec<RecordedRequest>,
    faults: VecDeque<Fault>,
    next_sha: u64,
    latency: Option<Duration>,
}

impl FakeState {
    fn mint_sha(&mut self, bytes: &[u8]) -> String {
        self.next_sha += 1;
        let mut hasher = Sha256::new();
        hasher.update(self.next_sha.to_be_bytes());
        hasher.update(bytes);
        hex::encode(hasher.finalize())[..40].to_string()
    }

    fn take_fault(&mut self, method: Method, path: &str) -> Option<FaultKind> {
        let index = self.faults.iter().position(|f| {
            f.method == method
                && match f.path_contains.as_deref() {
                    None => true,
                    Some(fragment) => path.contains(fragment),
                }
        })?;
        self.faults.remove(index).map(|f| f.kind)
    }
}

/// Shared handle to the fake. Clones observe the same state.
#[derive(Clone, Default)]
pub struct FakeGitHub {
    state: Arc<Mutex<FakeState>>,
}

impl FakeGitHub {
    /// A fake server for the account `login` with no repositories.
    pub fn new(login: &str) -> Self {
        let fake = FakeGitHub::default();
        fake.lock().login = login.to_string();
        fake
    }

    /// Builder form of [`FakeGitHub::add_repo`].
    pub fn with_repo(self, full_name: &str) -> Self {
        self.add_repo(full_name);
        self
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Only accept this bearer token; any other gets 401.
    pub fn require_token(&self, token: &str) {
        self.lock().token = Some(token.to_string());
    }

    pub fn add_repo(&self, full_name: &str) {
        self.lock()
            .repos
            .entry(full_name.to_string())
            .or_insert_with(|| FakeRepo {
                private: true,
                files: BTreeMap::new(),
            });
    }

    pub fn has_repo(&self, full_name: &str) -> bool {
        self.lock().repos.contains_key(full_name)
    }

    /// Place a file directly, as another client would. Returns its SHA.
    pub fn put_file(&self, repo: &str, file_name: &str, value: &Value) -> String {
        let bytes = serde_json::to_vec_pretty(value).unwrap_or_default();
        self.put_raw(repo, file_name, bytes)
    }

    /// Place raw bytes directly. Returns the SHA.
    pub fn put_raw(&self, repo: &str, file_name: &str, bytes: Vec<u8>) -> String {
        let mut state = self.lock();
        let sha = state.mint_sha(&bytes);
        let repo = state.repos.entry(repo.to_string()).or_default();
        repo.files.insert(
            file_name.to_string(),
            FakeFile {
                sha: sha.clone(),
                bytes,
            },
        );
        sha
    }

    /// Remove a file directly, bypassing the API.
    pub fn remove_file(&self, repo: &str, file_name: &str) {
        if let Some(repo) = self.lock().repos.get_mut(repo) {
            repo.files.remove(file_name);
        }
    }

    pub fn file_json(&self, repo: &str, file_name: &str) -> Option<Value> {
        let state = self.lock();
        let file = state.repos.get(repo)?.files.get(file_name)?;
        serde_json::from_slice(&file.bytes).ok()
    }

    pub fn file_text(&self, repo: &str, file_name: &str) -> Option<String> {
        let state = self.lock();
        let file = state.repos.get(repo)?.files.get(file_name)?;
        String::from_utf8(file.bytes.clone()).ok()
    }

    pub fn file_sha(&self, repo: &str, file_name: &str) -> Option<String> {
        let state = self.lock();
        Some(state.repos.get(repo)?.files.get(file_name)?.sha.clone())
    }

    pub fn file_names(&self, repo: &str) -> Vec<String> {
        let state = self.lock();
        state
            .repos
            .get(repo)
            .map(|r| r.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().log.clone()
    }

    /// PUT and DELETE requests received so far.
    pub fn writes(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method.is_write())
            .collect()
    }

    pub fn count(&self, method: Method) -> usize {
        self.lock().log.iter().filter(|r| r.method == method).count()
    }

    /// Answer the next `method` request with `status` and `message`.
    pub fn fail_next(&self, method: Method, status: u16, message: &str) {
        self.push_fault(method, None, FaultKind::Status(status, message.to_string()));
    }

    /// Like [`FakeGitHub::fail_next`], only for paths containing `fragment`.
    pub fn fail_next_on(&self, method: Method, fragment: &str, status: u16, message: &str) {
        self.push_fault(
            method,
            Some(fragment.to_string()),
            FaultKind::Status(status, message.to_string()),
        );
    }

    /// Fail the next `method` request below HTTP.
    pub fn disconnect_next(&self, method: Method) {
        self.push_fault(method, None, FaultKind::Disconnect);
    }

    fn push_fault(&self, method: Method, path_contains: Option<String>, kind: FaultKind) {
        self.lock().faults.push_back(Fault {
            method,
            path_contains,
            kind,
        });
    }

    /// Delay every response by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        self.lock().latency = Some(latency);
    }

    fn handle(&self, request: ApiRequest) -> TransportResult<ApiResponse> {
        let mut state = self.lock();
        state.log.push(RecordedRequest {
            method: request.method,
            path: request.path.clone(),
            body: request.body.clone(),
        });

        if let Some(fault) = state.take_fault(request.method, &request.path) {
            return match fault {
                FaultKind::Status(status, message) => {
                    Ok(ApiResponse::new(status, json!({ "message": message })))
                }
                FaultKind::Disconnect => Err(TransportError::ConnectionFailed(
                    "connection reset by fake".to_string(),
                )),
            };
        }

        if request.token.is_empty() {
            return Ok(error(401, "Requires authentication"));
        }
        if let Some(ref token) = state.token {
            if *token != request.token {
                return Ok(error(401, "Bad credentials"));
            }
        }

        let path = request.path.split('?').next().unwrap_or_default().to_string();
        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
        let body = request.body.unwrap_or(Value::Null);

        let response = match (request.method, segments.as_slice()) {
            (Method::Get, ["user"]) => user(&state),
            (Method::Get, ["user", "repos"]) => list_repos(&state),
            (Method::Post, ["user", "repos"]) => create_repo(&mut state, &body),
            (Method::Get, ["repos", owner, repo]) => get_repo(&state, owner, repo),
            (Method::Get, ["repos", owner, repo, "contents"]) => list_contents(&state, owner, repo),
            (method, ["repos", owner, repo, "contents", file]) => {
                let full = format!("{}/{}", owner, repo);
                let file = urlencoding::decode(file)
                    .map(|f| f.into_owned())
                    .unwrap_or_else(|_| file.to_string());
                match method {
                    Method::Get => get_file(&state, &full, &file),
                    Method::Put => put_file(&mut state, &full, &file, &body),
                    Method::Delete => delete_file(&mut state, &full, &file, &body),
                    Method::Post => error(404, "Not Found"),
                }
            }
            _ => error(404, "Not Found"),
        };
        Ok(response)
    }
}

impl Transport for FakeGitHub {
    fn execute(
        &self,
        request: ApiRequest,
    ) -> Pin<Box<dyn Future<Output = TransportResult<ApiResponse>> + Send + '_>> {
        Box::pin(async move {
            let latency = self.lock().latency;
            match latency {
                Some(delay) => tokio::time::sleep(delay).await,
                // Give other tasks a turn so tests see realistic interleaving
                None => tokio::task::yield_now().await,
            }
            self.handle(request)
        })
    }
}

fn error(status: u16, message: &str) -> ApiResponse {
    ApiResponse::new(status, json!({ "message": message }))
}

fn repo_json(full_name: &str, repo: &FakeRepo) -> Value {
    let name = full_name.rsplit('/').next().unwrap_or(full_name);
    json!({ "name": name, "full_name": full_name, "private": repo.private })
}

fn user(state: &FakeState) -> ApiResponse {
    ApiResponse::new(
        200,
        json!({
            "login": state.login,
            "name": format!("{} (fake)", state.login),
            "avatar_url": format!("https://avatars.example.com/{}", state.login),
        }),
    )
}

fn list_repos(state: &FakeState) -> ApiResponse {
    let repos: Vec<Value> = state
        .repos
        .iter()
        .map(|(name, repo)| repo_json(name, repo))
        .collect();
    ApiResponse::new(200, Value::Array(repos))
}

fn create_repo(state: &mut FakeState, body: &Value) -> ApiResponse {
    let Some(name) = body.get("name").and_then(Value::as_str) else {
        return error(422, "Repository creation failed.");
    };
    let full_name = format!("{}/{}", state.login, name);
    if state.repos.contains_key(&full_name) {
        return error(422, "name already exists on this account");
    }
    let repo = FakeRepo {
        private: body.get("private").and_then(Value::as_bool).unwrap_or(false),
        files: BTreeMap::new(),
    };
    let response = repo_json(&full_name, &repo);
    state.repos.insert(full_name, repo);
    ApiResponse::new(201, response)
}

fn get_repo(state: &FakeState, owner: &str, repo: &str) -> ApiResponse {
    let full = format!("{}/{}", owner, repo);
    match state.repos.get(&full) {
        Some(r) => ApiResponse::new(200, repo_json(&full, r)),
        None => error(404, "Not Found"),
    }
}

fn list_contents(state: &FakeState, owner: &str, repo: &str) -> ApiResponse {
    let full = format!("{}/{}", owner, repo);
    let Some(repo) = state.repos.get(&full) else {
        return error(404, "Not Found");
    };
    if repo.files.is_empty() {
        return error(404, "This repository is empty.");
    }
    let entries: Vec<Value> = repo
        .files
        .iter()
        .map(|(name, file)| json!({ "name": name, "path": name, "sha": file.sha, "type": "file" }))
        .collect();
    ApiResponse::new(200, Value::Array(entries))
}

/// Base64 wrapped at 60 columns, as GitHub returns file content.
fn wrapped_base64(bytes: &[u8]) -> String {
    let encoded = STANDARD.encode(bytes);
    let mut out = String::with_capacity(encoded.len() + encoded.len() / 60 + 1);
    for (i, ch) in encoded.chars().enumerate() {
        if i > 0 && i % 60 == 0 {
            out.push('\n');
        }
        out.push(ch);
    }
    out.push('\n');
    out
}

fn get_file(state: &FakeState, repo: &str, file: &str) -> ApiResponse {
    match state.repos.get(repo).and_then(|r| r.files.get(file)) {
        Some(f) => ApiResponse::new(
            200,
            json!({
                "type": "file",
                "name": file,
                "path": file,
                "sha": f.sha,
                "encoding": "base64",
                "content": wrapped_base64(&f.bytes),
            }),
        ),
        None => error(404, "Not Found"),
    }
}

fn put_file(state: &mut FakeState, repo: &str, file: &str, body: &Value) -> ApiResponse {
    let Some(content) = body.get("content").and_then(Value::as_str) else {
        return error(422, "Invalid request.\n\n\"content\" wasn't supplied.");
    };
    let Ok(bytes) = STANDARD.decode(content) else {
        return error(422, "content is not valid Base64");
    };
    let supplied = body.get("sha").and_then(Value::as_str);

    let current = match state.repos.get(repo) {
        Some(r) => r.files.get(file).map(|f| f.sha.clone()),
        None => return error(404, "Not Found"),
    };
    match (current.as_deref(), supplied) {
        (Some(_), None) => return error(422, "Invalid request.\n\n\"sha\" wasn't supplied."),
        (Some(cur), Some(sha)) if cur != sha => {
            return error(409, &format!("{} does not match {}", file, sha))
        }
        (None, Some(sha)) => return error(409, &format!("{} does not match {}", file, sha)),
        _ => {}
    }

    let created = current.is_none();
    let sha = state.mint_sha(&bytes);
    let commit = state.mint_sha(sha.as_bytes());
    if let Some(r) = state.repos.get_mut(repo) {
        r.files.insert(
            file.to_string(),
            FakeFile {
                sha: sha.clone(),
                bytes,
            },
        );
    }
    ApiResponse::new(
        if created { 201 } else { 200 },
        json!({
            "content": { "name": file, "path": file, "sha": sha },
            "commit": { "sha": commit, "message": body.get("message").cloned().unwrap_or(Value::Null) },
        }),
    )
}

fn delete_file(state: &mut FakeState, repo: &str, file: &str, body: &Value) -> ApiResponse {
    let current = match state.repos.get(repo).and_then(|r| r.files.get(file)) {
        Some(f) => f.sha.clone(),
        None => return error(404, "Not Found"),
    };
    match body.get("sha").and_then(Value::as_str) {
        None => return error(422, "Invalid request.\n\n\"sha\" wasn't supplied."),
        Some(sha) if sha != current => {
            return error(409, &format!("{} does not match {}", file, sha))
        }
        Some(_) => {}
    }
    if let Some(r) = state.repos.get_mut(repo) {
        r.files.remove(file);
    }
    let commit = state.mint_sha(file.as_bytes());
    ApiResponse::new(200, json!({ "content": null, "commit": { "sha": commit } }))
}

#[cfg(test)]
#[path = "testing_tests.rs"]
mod tests;
