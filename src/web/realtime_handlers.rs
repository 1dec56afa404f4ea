// src/web/realtime_handlers.rs
use crate::{
    models::realtime::RealtimeEvent,
    services::feedback_service,
    state::AppState,
};
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

// Mensagens pendentes por conexão antes de começarmos a descartar eventos
const WS_BUFFER: usize = 32;

// GET /ws
pub async fn realtime_websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    // Canal próprio desta conexão; o hub só vê o 'tx'
    let (tx, mut rx) = mpsc::channel::<Message>(WS_BUFFER);

    // Snapshot + registo no hub
    let conn_id = connect_client(&state, tx).await;
    let ativas = state.realtime.connection_count().await;
    tracing::info!("🔌 Nova conexão em tempo real: {} ({} ativas)", conn_id, ativas);

    // --- Task 1: canal -> cliente ---
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if ws_sender.send(msg).await.is_err() {
                tracing::debug!("Falha ao enviar para {}, terminando send_task.", conn_id);
                break;
            }
        }
    });

    // --- Task 2: cliente -> servidor ---
    // O cliente não envia comandos; só interessa saber quando fecha
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = ws_receiver.next().await {
            match msg {
                Message::Close(_) => break,
                _ => tracing::trace!("Ignorando mensagem de {}", conn_id),
            }
        }
    });

    // Quando uma termina, a outra é abortada
    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    // Sai do hub para deixar de receber broadcasts
    state.realtime.unregister(&conn_id).await;
    tracing::info!("🔌 Conexão em tempo real {} fechada.", conn_id);
}

/// Põe o `init` no canal do cliente e só depois regista-o no hub, para que o
/// snapshot chegue antes de qualquer broadcast. Nenhuma outra conexão o recebe.
pub async fn connect_client(state: &AppState, tx: mpsc::Sender<Message>) -> Uuid {
    send_init(state, &tx).await;
    state.realtime.register(tx).await
}

/// Falhas aqui nunca chegam ao cliente: sem snapshot, ele só recebe os próximos eventos.
async fn send_init(state: &AppState, tx: &mpsc::Sender<Message>) {
    let snapshot = match feedback_service::init_snapshot(&state.db).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!("Não foi possível montar o estado inicial: {:?}", e);
            return;
        }
    };
    match serde_json::to_string(&RealtimeEvent::Init(snapshot)) {
        Ok(text) => {
            // Canal cheio ou fechado: o cliente fica sem snapshot
            let _ = tx.try_send(Message::Text(text.into()));
        }
        Err(e) => tracing::warn!("Erro ao serializar estado inicial: {:?}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::Database,
        models::feedback::{MUITO_SATISFEITO, SATISFEITO},
        state::RealtimeHub,
    };
    use std::time::Duration;

    async fn test_state() -> AppState {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.init_schema().await.unwrap();
        AppState { db, realtime: RealtimeHub::default() }
    }

    async fn next_json(rx: &mut mpsc::Receiver<Message>) -> serde_json::Value {
        let message = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("mensagem não chegou a tempo")
            .expect("canal fechado");
        match message {
            Message::Text(text) => serde_json::from_str(text.as_str()).unwrap(),
            other => panic!("mensagem inesperada: {:?}", other),
        }
    }

    #[tokio::test]
    async fn new_client_gets_init_first_and_alone() {
        let state = test_state().await;
        let mut ids = Vec::new();
        for i in 0..12 {
            let grau = if i % 3 == 0 { MUITO_SATISFEITO } else { SATISFEITO };
            ids.push(
                feedback_service::registrar(&state.db, &state.realtime, grau.to_string())
                    .await
                    .unwrap()
                    .id,
            );
        }

        // Cliente já ligado antes do novo
        let (peer_tx, mut peer_rx) = mpsc::channel(WS_BUFFER);
        state.realtime.register(peer_tx).await;

        let (tx, mut rx) = mpsc::channel(WS_BUFFER);
        connect_client(&state, tx).await;
        assert_eq!(state.realtime.connection_count().await, 2);

        let init = next_json(&mut rx).await;
        assert_eq!(init["event"], "init");
        assert_eq!(init["data"]["stats"]["total_muito"], 4);
        assert_eq!(init["data"]["stats"]["total_satisfeito"], 8);
        assert_eq!(init["data"]["stats"]["total_insatisfeito"], 0);
        let recebidos: Vec<i64> = init["data"]["feedbacks"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_i64().unwrap())
            .collect();
        let esperados: Vec<i64> = ids.iter().rev().take(10).copied().collect();
        assert_eq!(recebidos, esperados);

        // Os publishes das inserções acima podem ainda estar pendentes; nenhum é um init
        tokio::time::sleep(Duration::from_millis(50)).await;
        while let Ok(Message::Text(text)) = peer_rx.try_recv() {
            let value: serde_json::Value = serde_json::from_str(text.as_str()).unwrap();
            assert_ne!(value["event"], "init");
        }
    }

    #[tokio::test]
    async fn init_precedes_later_broadcasts() {
        let state = test_state().await;
        let (tx, mut rx) = mpsc::channel(WS_BUFFER);
        connect_client(&state, tx).await;

        let registro = feedback_service::registrar(&state.db, &state.realtime, SATISFEITO.to_string())
            .await
            .unwrap();

        let init = next_json(&mut rx).await;
        assert_eq!(init["event"], "init");
        assert_eq!(init["data"]["feedbacks"], serde_json::json!([]));

        let novo = next_json(&mut rx).await;
        assert_eq!(novo["event"], "new_feedback");
        assert_eq!(novo["data"]["id"], registro.id);
        let stats = next_json(&mut rx).await;
        assert_eq!(stats["event"], "stats_update");
        assert_eq!(stats["data"]["total_satisfeito"], 1);
    }
}
