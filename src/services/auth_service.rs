// src/services/auth_service.rs
use crate::{
    db::Database,
    error::{AppError, AppResult},
};

/// Credenciais garantidas em todas as instalações (inseridas só se faltarem).
pub const ADMINS_INICIAIS: [(&str, &str); 6] = [
    ("admin_001", "1234"),
    ("admin_002", "2231"),
    ("admin_003", "4321"),
    ("admin_004", "3124"),
    ("admin_005", "3241"),
    ("admin_000", "0000"),
];

/// Verifica se a senha fornecida corresponde ao hash guardado.
pub async fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let password = password.to_string();
    let stored_hash = stored_hash.to_string();
    tokio::task::spawn_blocking(move || {
        tracing::debug!("Verificando hash bcrypt...");
        bcrypt::verify(&password, &stored_hash)
    })
    .await
    .map_err(|e| {
        tracing::error!("Erro na task spawn_blocking (verify_password): {:?}", e);
        AppError::InternalServerError
    })?
    .map_err(|e| {
        tracing::error!("Erro bcrypt ao verificar senha: {:?}", e);
        AppError::PasswordHashingError
    })
}

/// Gera um hash bcrypt para uma senha.
pub async fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || {
        tracing::debug!("Gerando hash bcrypt (custo {})...", cost);
        bcrypt::hash(&password, cost)
    })
    .await
    .map_err(|e| {
        tracing::error!("Erro na task spawn_blocking (hash_password): {:?}", e);
        AppError::InternalServerError
    })?
    .map_err(|e| {
        tracing::error!("Erro bcrypt ao gerar hash: {:?}", e);
        AppError::PasswordHashingError
    })
}

/// Insere os admins iniciais que ainda não existem. Pode correr em todos os arranques.
pub async fn seed_admins(db: &Database, cost: u32) -> AppResult<usize> {
    let existentes = db.existing_admins().await?;
    let mut inseridos = 0;

    for (username, senha) in ADMINS_INICIAIS {
        if existentes.iter().any(|u| u == username) {
            continue;
        }
        let senha_hash = hash_password(senha, cost).await?;
        // Outro processo pode ter inserido entretanto; o conflito é ignorado
        if db.insert_admin_if_absent(username, &senha_hash).await? {
            inseridos += 1;
        }
    }

    if inseridos > 0 {
        tracing::info!("{} admin(s) inicial(is) criados.", inseridos);
    } else {
        tracing::debug!("Admins iniciais já presentes.");
    }

    upgrade_plaintext_admins(db, &existentes, cost).await?;
    Ok(inseridos)
}

fn is_bcrypt_hash(senha: &str) -> bool {
    senha.starts_with("$2")
}

/// Bases antigas guardavam a senha em texto simples; converte-as para bcrypt
/// mantendo a mesma senha.
async fn upgrade_plaintext_admins(db: &Database, usernames: &[String], cost: u32) -> AppResult<()> {
    for username in usernames {
        let Some(admin) = db.find_admin(username).await? else {
            continue;
        };
        if is_bcrypt_hash(&admin.senha) {
            continue;
        }
        let senha_hash = hash_password(&admin.senha, cost).await?;
        db.update_admin_senha(username, &senha_hash).await?;
        tracing::warn!("Senha em texto simples de '{}' convertida para bcrypt.", username);
    }
    Ok(())
}

/// `Ok(false)` tanto para utilizador inexistente como para senha errada.
pub async fn authenticate(db: &Database, username: &str, senha: &str) -> AppResult<bool> {
    match db.find_admin(username).await? {
        Some(admin) => {
            tracing::debug!("Verificando senha de '{}'", admin.username);
            verify_password(senha, &admin.senha).await
        }
        None => {
            tracing::debug!("Admin '{}' não encontrado.", username);
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    async fn memory_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.init_schema().await.unwrap();
        db
    }

    #[tokio::test]
    async fn seeding_twice_keeps_exactly_six_admins() {
        let db = memory_db().await;
        assert_eq!(seed_admins(&db, TEST_COST).await.unwrap(), 6);
        assert_eq!(seed_admins(&db, TEST_COST).await.unwrap(), 0);
        assert_eq!(db.existing_admins().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn passwords_are_not_stored_in_plain_text() {
        let db = memory_db().await;
        seed_admins(&db, TEST_COST).await.unwrap();
        let admin = db.find_admin("admin_001").await.unwrap().unwrap();
        assert_ne!(admin.senha, "1234");
        assert!(admin.senha.starts_with("$2"));
    }

    #[tokio::test]
    async fn authenticate_checks_seeded_pairs() {
        let db = memory_db().await;
        seed_admins(&db, TEST_COST).await.unwrap();
        assert!(authenticate(&db, "admin_001", "1234").await.unwrap());
        assert!(authenticate(&db, "admin_000", "0000").await.unwrap());
        assert!(!authenticate(&db, "admin_001", "wrong").await.unwrap());
        assert!(!authenticate(&db, "admin_999", "1234").await.unwrap());
    }

    #[tokio::test]
    async fn plaintext_rows_from_older_stores_are_rehashed() {
        let db = memory_db().await;
        // Linha como uma instalação antiga a deixaria
        db.insert_admin_if_absent("admin_001", "1234").await.unwrap();

        assert_eq!(seed_admins(&db, TEST_COST).await.unwrap(), 5);

        let admin = db.find_admin("admin_001").await.unwrap().unwrap();
        assert!(admin.senha.starts_with("$2"));
        assert!(authenticate(&db, "admin_001", "1234").await.unwrap());
        assert!(!authenticate(&db, "admin_001", "wrong").await.unwrap());
    }
}
