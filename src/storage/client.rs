use super::{
    ConfigurationDetail, NewTrigger, StorageApi, StorageError, StorageResult, TableDetail, Trigger,
};
use std::time::Instant;
use ureq::http::Response;
use ureq::{Agent, Body};

const TOKEN_HEADER: &str = "X-StorageApi-Token";

/// Blocking Storage API client authenticated with a single token.
pub struct StorageClient {
    agent: Agent,
    base_url: String,
    token: String,
}

impl StorageClient {
    /// `url` is the stack root (e.g. `https://connection.keboola.com`).
    pub fn new(url: &str, token: &str) -> Self {
        // Status codes are inspected here so error bodies can be parsed.
        let agent: Agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();
        Self {
            agent,
            base_url: format!("{}/v2/storage", url.trim_end_matches('/')),
            token: token.to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn get(&self, path: &str) -> StorageResult<Response<Body>> {
        let started = Instant::now();
        let response = self
            .agent
            .get(&self.endpoint(path))
            .header(TOKEN_HEADER, self.token.as_str())
            .call()?;
        log_call("GET", path, &response, started);
        Ok(response)
    }
}

impl StorageApi for StorageClient {
    fn list_triggers(&self) -> StorageResult<Vec<Trigger>> {
        let mut response = ensure_success(self.get("triggers")?)?;
        Ok(response.body_mut().read_json()?)
    }

    fn get_trigger(&self, trigger_id: &str) -> StorageResult<Trigger> {
        let mut response = ensure_success(self.get(&format!("triggers/{trigger_id}"))?)?;
        Ok(response.body_mut().read_json()?)
    }

    fn get_configuration_detail(
        &self,
        component_id: &str,
        configuration_id: &str,
    ) -> StorageResult<ConfigurationDetail> {
        let path = format!("components/{component_id}/configs/{configuration_id}");
        let mut response = ensure_success(self.get(&path)?)?;
        Ok(response.body_mut().read_json()?)
    }

    fn get_table_detail(&self, table_id: &str) -> StorageResult<Option<TableDetail>> {
        let response = self.get(&format!("tables/{table_id}"))?;
        if response.status().as_u16() == 404 {
            return Ok(None);
        }
        let mut response = ensure_success(response)?;
        Ok(Some(response.body_mut().read_json()?))
    }

    fn create_trigger(&self, spec: &NewTrigger) -> StorageResult<Trigger> {
        let started = Instant::now();
        let response = self
            .agent
            .post(&self.endpoint("triggers"))
            .header(TOKEN_HEADER, self.token.as_str())
            .send_json(spec)?;
        log_call("POST", "triggers", &response, started);
        let mut response = ensure_success(response)?;
        let created: Trigger = response.body_mut().read_json()?;
        tracing::info!(trigger_id = %created.id, "trigger created");
        Ok(created)
    }

    fn remove_trigger(&self, trigger_id: &str) -> StorageResult<()> {
        let path = format!("triggers/{trigger_id}");
        let started = Instant::now();
        let response = self
            .agent
            .delete(&self.endpoint(&path))
            .header(TOKEN_HEADER, self.token.as_str())
            .call()?;
        log_call("DELETE", &path, &response, started);
        ensure_success(response)?;
        tracing::info!(trigger_id, "trigger deleted");
        Ok(())
    }
}

fn ensure_success(mut response: Response<Body>) -> StorageResult<Response<Body>> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.body_mut().read_to_string()?;
    Err(StorageError::from_response(status.as_u16(), &body))
}

fn log_call(method: &str, path: &str, response: &Response<Body>, started: Instant) {
    tracing::debug!(
        method,
        path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "storage api call"
    );
}
