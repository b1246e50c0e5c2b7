// src/services/customer_service.rs

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::{
    common::error::AppError,
    db::SheetsRepository,
    models::Customer,
    services::{
        filter::{self, CustomerFilter},
        normalizer,
        segments::{self, NewCustomerEntry},
        whatsapp::{self, MessageTemplate},
    },
};

// =============================================================================
//  SERVIÇO DE CLIENTES (coleção canônica + coordenador de ações)
// =============================================================================
//
// A coleção canônica vive aqui, em memória, atrás de um RwLock. Só existem
// dois caminhos de mutação: substituição total (refresh) e patch de um campo
// (atualização otimista). Todas as vistas derivam dela a cada requisição,
// então um patch aparece em tudo na hora, sem sincronização extra.

#[derive(Clone)]
pub struct CustomerService {
    repo: SheetsRepository,
    customers: Arc<RwLock<Vec<Customer>>>,
}

impl CustomerService {
    pub fn new(repo: SheetsRepository) -> Self {
        Self {
            repo,
            customers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// O "hoje" do processo. As funções de data recebem isso injetado.
    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    // =========================================================================
    //  CARGA / RECARGA
    // =========================================================================

    /// Busca tudo da planilha, normaliza e substitui a coleção inteira.
    /// Devolve quantos clientes entraram.
    pub async fn refresh(&self) -> Result<usize, AppError> {
        let rows = self.repo.fetch_rows().await?;
        let customers = normalizer::normalize_rows(&rows);
        let count = customers.len();

        *self.customers.write().await = customers;
        tracing::info!("✅ Coleção de clientes recarregada: {} registros", count);
        Ok(count)
    }

    // =========================================================================
    //  VISTAS (derivações puras da coleção)
    // =========================================================================

    /// Lista filtrada, na ordem original da planilha.
    pub async fn list(&self, filter_spec: &CustomerFilter) -> Vec<Customer> {
        let customers = self.customers.read().await;
        filter::apply(&customers, filter_spec, Self::today())
    }

    /// Aniversariantes do dia.
    pub async fn birthdays(&self) -> Vec<Customer> {
        let customers = self.customers.read().await;
        segments::birthdays_today(&customers, Self::today())
    }

    /// Clientes novos (até 50, mais recentes primeiro) ainda não contactados.
    pub async fn new_uncontacted(&self) -> Vec<NewCustomerEntry> {
        let customers = self.customers.read().await;
        segments::newest_uncontacted(&customers, Self::today())
    }

    /// Zonas únicas para o filtro facetado.
    pub async fn zones(&self) -> Vec<String> {
        let customers = self.customers.read().await;
        segments::unique_zones(&customers)
    }

    /// Link de WhatsApp pré-preenchido para um cliente.
    pub async fn whatsapp_link(
        &self,
        customer_id: &str,
        template: MessageTemplate,
    ) -> Result<String, AppError> {
        let customers = self.customers.read().await;
        let customer = customers
            .iter()
            .find(|c| c.id == customer_id)
            .ok_or(AppError::CustomerNotFound)?;

        whatsapp::build_link(customer, template).ok_or(AppError::MissingPhone)
    }

    // =========================================================================
    //  AÇÕES OTIMISTAS (escrita em background, patch imediato)
    // =========================================================================
    //
    // Política única para as duas ações: o patch local acontece já e a
    // resposta HTTP não espera a planilha; se a escrita em background falhar,
    // o campo volta ao valor anterior e o erro fica no log. (O comportamento
    // antigo divergia entre venda e contato; unificamos pelo rollback.)

    /// Registra uma venda: `last_purchase` vira a data de hoje, a escrita
    /// `guardarVenta` segue em background.
    pub async fn register_sale(&self, customer_id: &str) -> Result<(), AppError> {
        let today = Self::today().format("%Y-%m-%d").to_string();

        let previous = {
            let mut customers = self.customers.write().await;
            let customer = customers
                .iter_mut()
                .find(|c| c.id == customer_id)
                .ok_or(AppError::CustomerNotFound)?;
            std::mem::replace(&mut customer.last_purchase, today.clone())
        };

        let repo = self.repo.clone();
        let customers = Arc::clone(&self.customers);
        let id = customer_id.to_string();
        tokio::spawn(async move {
            match repo.register_sale(&id, &today).await {
                Ok(()) => {
                    tracing::info!("✅ Venda registrada na planilha para o cliente {}", id);
                }
                Err(e) => {
                    tracing::error!(
                        "🔥 Falha ao registrar venda do cliente {}: {}. Revertendo patch local",
                        id,
                        e
                    );
                    let mut customers = customers.write().await;
                    if let Some(c) = customers.iter_mut().find(|c| c.id == id) {
                        c.last_purchase = previous;
                    }
                }
            }
        });

        Ok(())
    }

    /// Marca o cliente como contactado: `contacted` vira "Sí" localmente,
    /// `marcarContactado` segue em background.
    pub async fn mark_contacted(&self, customer_id: &str) -> Result<(), AppError> {
        let previous = {
            let mut customers = self.customers.write().await;
            let customer = customers
                .iter_mut()
                .find(|c| c.id == customer_id)
                .ok_or(AppError::CustomerNotFound)?;
            std::mem::replace(&mut customer.contacted, "Sí".to_string())
        };

        let repo = self.repo.clone();
        let customers = Arc::clone(&self.customers);
        let id = customer_id.to_string();
        tokio::spawn(async move {
            match repo.mark_contacted(&id).await {
                Ok(()) => {
                    tracing::info!("✅ Cliente {} marcado como contactado na planilha", id);
                }
                Err(e) => {
                    tracing::error!(
                        "🔥 Falha ao marcar cliente {} como contactado: {}. Revertendo patch local",
                        id,
                        e
                    );
                    let mut customers = customers.write().await;
                    if let Some(c) = customers.iter_mut().find(|c| c.id == id) {
                        c.contacted = previous;
                    }
                }
            }
        });

        Ok(())
    }

    // =========================================================================
    //  CADASTRO
    // =========================================================================

    /// Cadastra um cliente novo na planilha e recarrega a coleção: o ID da
    /// linha é atribuído lá, então a recarga é o jeito de vê-lo aqui.
    pub async fn create_customer(&self, fields: &Value) -> Result<usize, AppError> {
        self.repo.save_customer(fields).await?;
        self.refresh().await
    }
}
