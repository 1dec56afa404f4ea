// src/state.rs
use crate::{db::Database, models::realtime::RealtimeEvent};
use axum::extract::ws::Message;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{mpsc, Mutex};
use uuid::Uuid;

// Canal de saída de uma conexão WebSocket individual
pub type WsTx = mpsc::Sender<Message>;

/// Conexões do canal em tempo real abertas neste processo.
/// Entrega sem garantias: quem estiver lento ou desligado perde o evento.
#[derive(Debug, Clone, Default)]
pub struct RealtimeHub {
    connections: Arc<Mutex<HashMap<Uuid, WsTx>>>,
}

impl RealtimeHub {
    pub async fn register(&self, tx: WsTx) -> Uuid {
        let conn_id = Uuid::new_v4();
        self.connections.lock().await.insert(conn_id, tx);
        conn_id
    }

    pub async fn unregister(&self, conn_id: &Uuid) {
        self.connections.lock().await.remove(conn_id);
    }

    pub async fn connection_count(&self) -> usize {
        self.connections.lock().await.len()
    }

    /// Envia um evento para TODAS as conexões ativas, sem esperar por nenhuma.
    pub async fn broadcast(&self, event: &RealtimeEvent) {
        let text = match serde_json::to_string(event) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Erro ao serializar evento em tempo real: {:?}", e);
                return;
            }
        };
        let message = Message::Text(text.into());

        let connections = self.connections.lock().await;
        for (conn_id, tx) in connections.iter() {
            match tx.try_send(message.clone()) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    tracing::warn!("Buffer cheio na conexão {}, evento descartado.", conn_id);
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    tracing::debug!("Conexão {} já fechada, evento ignorado.", conn_id);
                }
            }
        }
    }

    /// Publica em segundo plano; quem chama nunca espera nem vê erros.
    pub fn publish(&self, events: Vec<RealtimeEvent>) {
        let hub = self.clone();
        tokio::spawn(async move {
            for event in &events {
                hub.broadcast(event).await;
            }
        });
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub realtime: RealtimeHub,
}

impl axum::extract::FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Database {
        state.db.clone()
    }
}

impl axum::extract::FromRef<AppState> for RealtimeHub {
    fn from_ref(state: &AppState) -> RealtimeHub {
        state.realtime.clone()
    }
}
