// src/db/sheets_repo.rs

use std::time::Duration;

use reqwest::Client;
use serde_json::{Value, json};

use crate::common::error::AppError;

// =============================================================================
//  REPOSITÓRIO DA PLANILHA (Apps Script)
// =============================================================================
//
// Aqui não tem banco: a "persistência" é uma planilha do Google atrás de um
// Apps Script publicado como web app. Este repositório é o único lugar do
// código que conhece o contrato de fio (actions, token, formatos de resposta).

#[derive(Clone)]
pub struct SheetsRepository {
    client: Client,
    script_url: String,
    token: String,
}

impl SheetsRepository {
    /// Monta o cliente HTTP com timeout. O Apps Script costuma ser lento,
    /// então 30s de margem.
    pub fn new(script_url: String, token: String) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            script_url,
            token,
        })
    }

    // =========================================================================
    //  LEITURA
    // =========================================================================

    /// Busca todas as linhas de clientes da planilha, ainda cruas.
    ///
    /// O Apps Script já respondeu em três formatos diferentes ao longo do
    /// tempo: array puro, `{ "clientes": [...] }` e `{ "data": [...] }`.
    /// Toleramos os três. Um campo `error` no topo é tratado como falha.
    pub async fn fetch_rows(&self) -> Result<Vec<Value>, AppError> {
        let response = self
            .client
            .get(&self.script_url)
            .query(&[("action", "getClientes"), ("token", self.token.as_str())])
            .send()
            .await?;

        let body: Value = Self::check_status(response).await?.json().await?;

        if let Some(message) = body.get("error").and_then(Value::as_str) {
            return Err(AppError::SheetsApi(message.to_string()));
        }

        let rows = if let Some(rows) = body.as_array() {
            rows.clone()
        } else if let Some(rows) = body.get("clientes").and_then(Value::as_array) {
            rows.clone()
        } else if let Some(rows) = body.get("data").and_then(Value::as_array) {
            rows.clone()
        } else {
            return Err(AppError::UnexpectedPayload(
                "nenhuma lista de clientes na resposta".to_string(),
            ));
        };

        Ok(rows)
    }

    // =========================================================================
    //  ESCRITA
    // =========================================================================

    /// Registra uma venda para o cliente na planilha.
    /// `date` vai no formato YYYY-MM-DD (o Apps Script espera assim).
    pub async fn register_sale(&self, customer_id: &str, date: &str) -> Result<(), AppError> {
        let payload = json!({
            "action": "guardarVenta",
            "token": self.token,
            "clienteID": customer_id,
            "fecha": date,
        });

        let response = self
            .client
            .post(&self.script_url)
            .json(&payload)
            .send()
            .await?;

        Self::check_body(response).await
    }

    /// Marca o cliente como contactado.
    /// O token vai na query string (é assim que o script espera nesta action).
    pub async fn mark_contacted(&self, customer_id: &str) -> Result<(), AppError> {
        let payload = json!({
            "action": "marcarContactado",
            "clienteId": customer_id,
        });

        let response = self
            .client
            .post(&self.script_url)
            .query(&[
                ("action", "marcarContactado"),
                ("token", self.token.as_str()),
            ])
            .json(&payload)
            .send()
            .await?;

        Self::check_body(response).await
    }

    /// Cadastra um cliente novo. Os campos extras do payload são repassados
    /// como vieram; a planilha é quem decide as colunas.
    pub async fn save_customer(&self, fields: &Value) -> Result<(), AppError> {
        let mut payload = json!({
            "action": "guardarCliente",
            "token": self.token,
        });
        if let (Some(body), Some(extra)) = (payload.as_object_mut(), fields.as_object()) {
            for (key, value) in extra {
                body.insert(key.clone(), value.clone());
            }
        }

        let response = self
            .client
            .post(&self.script_url)
            .json(&payload)
            .send()
            .await?;

        Self::check_body(response).await
    }

    // =========================================================================
    //  HELPERS
    // =========================================================================

    /// Status não-2xx vira erro tipado com o corpo que conseguirmos ler.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, AppError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::SheetsApi(format!("status {status}: {body}")));
        }
        Ok(response)
    }

    /// Para escritas: além do status, o script sinaliza falha com um campo
    /// `error` dentro de um 200. Consideramos sucesso a ausência de `error`.
    async fn check_body(response: reqwest::Response) -> Result<(), AppError> {
        let body: Value = Self::check_status(response).await?.json().await?;

        if let Some(message) = body.get("error").and_then(Value::as_str) {
            return Err(AppError::SheetsApi(message.to_string()));
        }

        Ok(())
    }
}
