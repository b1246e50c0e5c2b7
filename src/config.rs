// src/config.rs

use std::env;

use crate::{db::SheetsRepository, services::CustomerService};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub customer_service: CustomerService,
}

impl AppState {
    // A assinatura retorna um Result!
    // .expect() nas variáveis é proposital: sem credenciais da planilha a
    // aplicação não tem o que fazer, melhor não subir.
    pub fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        // O deploy antigo usava os nomes em minúsculas; aceitamos os dois
        let script_url = env::var("APPSCRIPT_URL")
            .or_else(|_| env::var("scriptUrl"))
            .expect("APPSCRIPT_URL deve ser definida");
        let token = env::var("APPSCRIPT_TOKEN")
            .or_else(|_| env::var("token"))
            .expect("APPSCRIPT_TOKEN deve ser definido");

        // --- Monta o gráfico de dependências ---
        let sheets_repo = SheetsRepository::new(script_url, token)?;
        let customer_service = CustomerService::new(sheets_repo);

        Ok(Self { customer_service })
    }
}
