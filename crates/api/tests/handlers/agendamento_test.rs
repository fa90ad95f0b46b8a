use chrono::{NaiveDate, NaiveTime};
use pretty_assertions::assert_eq;
use quadra_api::middleware::error_handling::AppError;
use quadra_core::{
    errors::QuadraError,
    models::agendamento::{AgendamentoResponse, CriarAgendamentoRequest, StatusAgendamento},
    models::local::HorarioFuncionamento,
    time::{dia_semana, slots_de_hora, TimeOfDay, SLOT_MINUTES},
};
use quadra_db::models::DbHorarioFuncionamento;
use uuid::Uuid;

use crate::test_utils::{db_agendamento, db_horario_aberto, db_local, db_mensalidade, TestContext};

const MSG_HORARIO_RESERVADO: &str = "Horário já reservado. Escolha outro horário.";

fn horario_core(row: &DbHorarioFuncionamento) -> Result<HorarioFuncionamento, QuadraError> {
    let abertura = row
        .abertura
        .map(TimeOfDay::try_from)
        .transpose()
        .map_err(|e| QuadraError::Internal(e.to_string().into()))?;
    let fechamento = row
        .fechamento
        .map(TimeOfDay::try_from)
        .transpose()
        .map_err(|e| QuadraError::Internal(e.to_string().into()))?;
    Ok(HorarioFuncionamento {
        dia_semana: row.dia_semana as u8,
        aberto: row.aberto,
        abertura,
        fechamento,
    })
}

// Mirror of the booking handler's decision flow, against mock repositories
async fn test_criar_agendamento_wrapper(
    ctx: &mut TestContext,
    jogador_id: Uuid,
    payload: CriarAgendamentoRequest,
) -> Result<AgendamentoResponse, AppError> {
    let local = ctx
        .local_repo
        .get_local_by_id(payload.local_id)
        .await?
        .ok_or_else(|| {
            AppError(QuadraError::NotFound(format!(
                "Local com ID {} não encontrado",
                payload.local_id
            )))
        })?;

    let dia = dia_semana(payload.data) as i16;
    let horario = ctx
        .local_repo
        .get_horario_by_local_and_dia(local.id, dia)
        .await?;
    let horario = horario
        .as_ref()
        .map(horario_core)
        .transpose()
        .map_err(AppError)?;

    let janela = horario.as_ref().and_then(|h| h.janela()).ok_or_else(|| {
        AppError(QuadraError::Validation(
            "O local está fechado nesse dia".to_string(),
        ))
    })?;

    if !slots_de_hora(janela.0, janela.1).contains(&payload.inicio) {
        return Err(AppError(QuadraError::Validation(
            "Horário fora do funcionamento do local".to_string(),
        )));
    }

    let inicio: NaiveTime = payload.inicio.into();

    let ja_reservado = ctx
        .agendamento_repo
        .get_agendamento_confirmado(local.id, payload.data, inicio)
        .await?
        .is_some();
    let mensalista = ctx
        .mensalidade_repo
        .get_mensalidade_ativa(local.id, dia, inicio)
        .await?
        .is_some();

    if ja_reservado || mensalista {
        return Err(AppError(QuadraError::Conflict(
            MSG_HORARIO_RESERVADO.to_string(),
        )));
    }

    let db = ctx
        .agendamento_repo
        .create_agendamento(local.id, jogador_id, payload.data, inicio)
        .await?;

    let inicio = TimeOfDay::try_from(db.inicio)
        .map_err(|e| AppError(QuadraError::Internal(e.to_string().into())))?;
    Ok(AgendamentoResponse {
        id: db.id,
        local_id: db.local_id,
        data: db.data,
        inicio,
        fim: inicio.checked_add_minutes(SLOT_MINUTES).unwrap(),
        status: StatusAgendamento::Confirmado,
    })
}

fn pedido(local_id: i64, inicio: &str) -> CriarAgendamentoRequest {
    CriarAgendamentoRequest {
        local_id,
        // 2024-01-08 is a Monday (dia_semana = 1)
        data: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
        inicio: TimeOfDay::parse(inicio).unwrap(),
    }
}

fn mocks_local_aberto(ctx: &mut TestContext, locador_id: Uuid) {
    ctx.local_repo
        .expect_get_local_by_id()
        .returning(move |id| Ok(Some(db_local(id, locador_id))));
    ctx.local_repo
        .expect_get_horario_by_local_and_dia()
        .returning(|local_id, dia| Ok(Some(db_horario_aberto(local_id, dia, "09:00", "13:00"))));
}

#[tokio::test]
async fn test_criar_agendamento_local_not_found() {
    let mut ctx = TestContext::new();

    ctx.local_repo
        .expect_get_local_by_id()
        .returning(|_| Ok(None));

    let result = test_criar_agendamento_wrapper(&mut ctx, Uuid::new_v4(), pedido(42, "10:00")).await;

    assert!(result.is_err());
    match result.unwrap_err().0 {
        QuadraError::NotFound(_) => {} // Expected
        e => panic!("Expected NotFound error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_criar_agendamento_rejects_start_outside_schedule() {
    let mut ctx = TestContext::new();
    mocks_local_aberto(&mut ctx, Uuid::new_v4());

    // 10:30 is not an hourly slot boundary of a 09:00-13:00 window
    let result = test_criar_agendamento_wrapper(&mut ctx, Uuid::new_v4(), pedido(1, "10:30")).await;

    assert!(result.is_err());
    match result.unwrap_err().0 {
        QuadraError::Validation(_) => {} // Expected
        e => panic!("Expected Validation error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_criar_agendamento_rejects_closed_day() {
    let mut ctx = TestContext::new();
    let locador_id = Uuid::new_v4();

    ctx.local_repo
        .expect_get_local_by_id()
        .returning(move |id| Ok(Some(db_local(id, locador_id))));
    ctx.local_repo
        .expect_get_horario_by_local_and_dia()
        .returning(|_, _| Ok(None));

    let result = test_criar_agendamento_wrapper(&mut ctx, Uuid::new_v4(), pedido(1, "10:00")).await;

    assert!(result.is_err());
    match result.unwrap_err().0 {
        QuadraError::Validation(msg) => assert!(msg.contains("fechado")),
        e => panic!("Expected Validation error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_criar_agendamento_conflict_when_slot_taken() {
    let mut ctx = TestContext::new();
    mocks_local_aberto(&mut ctx, Uuid::new_v4());

    ctx.agendamento_repo
        .expect_get_agendamento_confirmado()
        .returning(|local_id, data, _| Ok(Some(db_agendamento(77, local_id, data, "10:00"))));
    ctx.mensalidade_repo
        .expect_get_mensalidade_ativa()
        .returning(|_, _, _| Ok(None));

    let result = test_criar_agendamento_wrapper(&mut ctx, Uuid::new_v4(), pedido(1, "10:00")).await;

    assert!(result.is_err());
    match result.unwrap_err().0 {
        QuadraError::Conflict(msg) => assert!(msg.contains("já reservado")),
        e => panic!("Expected Conflict error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_criar_agendamento_conflict_when_weekly_subscriber_holds_slot() {
    let mut ctx = TestContext::new();
    mocks_local_aberto(&mut ctx, Uuid::new_v4());

    ctx.agendamento_repo
        .expect_get_agendamento_confirmado()
        .returning(|_, _, _| Ok(None));
    ctx.mensalidade_repo
        .expect_get_mensalidade_ativa()
        .returning(|local_id, dia, _| Ok(Some(db_mensalidade(3, local_id, dia, "10:00", "ativa"))));

    let result = test_criar_agendamento_wrapper(&mut ctx, Uuid::new_v4(), pedido(1, "10:00")).await;

    assert!(result.is_err());
    assert!(matches!(result.unwrap_err().0, QuadraError::Conflict(_)));
}

#[tokio::test]
async fn test_criar_agendamento_success() {
    let mut ctx = TestContext::new();
    let jogador_id = Uuid::new_v4();
    mocks_local_aberto(&mut ctx, Uuid::new_v4());

    ctx.agendamento_repo
        .expect_get_agendamento_confirmado()
        .returning(|_, _, _| Ok(None));
    ctx.mensalidade_repo
        .expect_get_mensalidade_ativa()
        .returning(|_, _, _| Ok(None));
    ctx.agendamento_repo
        .expect_create_agendamento()
        .times(1)
        .returning(|local_id, _, data, _| Ok(db_agendamento(101, local_id, data, "10:00")));

    let response = test_criar_agendamento_wrapper(&mut ctx, jogador_id, pedido(1, "10:00"))
        .await
        .expect("booking succeeds on a free slot");

    assert_eq!(response.id, 101);
    assert_eq!(response.local_id, 1);
    assert_eq!(response.inicio, TimeOfDay::parse("10:00").unwrap());
    assert_eq!(response.fim, TimeOfDay::parse("11:00").unwrap());
    assert_eq!(response.status, StatusAgendamento::Confirmado);
}
