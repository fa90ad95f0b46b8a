use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create usuarios table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS usuarios (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            nome VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            senha_hash VARCHAR(255) NOT NULL,
            papel VARCHAR(16) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT papel_valido CHECK (papel IN ('jogador', 'locador'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create sessoes table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessoes (
            token UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            usuario_id UUID NOT NULL REFERENCES usuarios(id),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            expires_at TIMESTAMP WITH TIME ZONE NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create locais table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS locais (
            id BIGSERIAL PRIMARY KEY,
            locador_id UUID NOT NULL REFERENCES usuarios(id),
            nome VARCHAR(255) NOT NULL,
            endereco VARCHAR(255) NOT NULL,
            cidade VARCHAR(255) NOT NULL,
            esporte VARCHAR(64) NOT NULL,
            valor_hora BIGINT NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create horarios_funcionamento table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS horarios_funcionamento (
            id BIGSERIAL PRIMARY KEY,
            local_id BIGINT NOT NULL REFERENCES locais(id),
            dia_semana SMALLINT NOT NULL,
            aberto BOOLEAN NOT NULL,
            abertura TIME NULL,
            fechamento TIME NULL,
            CONSTRAINT dia_semana_valido CHECK (dia_semana BETWEEN 0 AND 6),
            CONSTRAINT janela_valida CHECK (NOT aberto OR abertura < fechamento),
            UNIQUE (local_id, dia_semana)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create agendamentos table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS agendamentos (
            id BIGSERIAL PRIMARY KEY,
            local_id BIGINT NOT NULL REFERENCES locais(id),
            jogador_id UUID NOT NULL REFERENCES usuarios(id),
            data DATE NOT NULL,
            inicio TIME NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'confirmado',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT status_agendamento_valido CHECK (status IN ('confirmado', 'cancelado'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create mensalidades table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS mensalidades (
            id BIGSERIAL PRIMARY KEY,
            local_id BIGINT NOT NULL REFERENCES locais(id),
            jogador_id UUID NOT NULL REFERENCES usuarios(id),
            dia_semana SMALLINT NOT NULL,
            inicio TIME NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'solicitada',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT dia_semana_valido CHECK (dia_semana BETWEEN 0 AND 6),
            CONSTRAINT status_mensalidade_valido CHECK (status IN ('solicitada', 'ativa', 'cancelada'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Concurrent double-booking loses here even if the handler pre-check raced
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_agendamentos_slot_unico
            ON agendamentos(local_id, data, inicio)
            WHERE status = 'confirmado';
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_mensalidades_slot_unico
            ON mensalidades(local_id, dia_semana, inicio)
            WHERE status = 'ativa';
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_sessoes_usuario_id ON sessoes(usuario_id);
        CREATE INDEX IF NOT EXISTS idx_locais_locador_id ON locais(locador_id);
        CREATE INDEX IF NOT EXISTS idx_horarios_local_id ON horarios_funcionamento(local_id);
        CREATE INDEX IF NOT EXISTS idx_agendamentos_local_data ON agendamentos(local_id, data);
        CREATE INDEX IF NOT EXISTS idx_agendamentos_jogador_id ON agendamentos(jogador_id);
        CREATE INDEX IF NOT EXISTS idx_mensalidades_local_dia ON mensalidades(local_id, dia_semana);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
