use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use quadra_api::middleware::error_handling::AppError;
use quadra_core::{
    errors::QuadraError,
    models::disponibilidade::{montar_disponibilidade, Disponibilidade, SlotStatus},
    models::local::HorarioFuncionamento,
    time::{dia_semana, TimeOfDay},
};
use quadra_db::models::DbHorarioFuncionamento;
use uuid::Uuid;

use crate::test_utils::{
    db_agendamento, db_horario_aberto, db_horario_fechado, db_local, db_mensalidade, TestContext,
};

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

// Mirror of the handler's data flow, against mock repositories
async fn test_disponibilidade_wrapper(
    ctx: &mut TestContext,
    local_id: i64,
    data: NaiveDate,
    visao_locador: bool,
) -> Result<Disponibilidade, AppError> {
    let local = ctx
        .local_repo
        .get_local_by_id(local_id)
        .await?
        .ok_or_else(|| {
            AppError(QuadraError::NotFound(format!(
                "Local com ID {} não encontrado",
                local_id
            )))
        })?;

    let dia = dia_semana(data) as i16;
    let horario = ctx
        .local_repo
        .get_horario_by_local_and_dia(local.id, dia)
        .await?;
    let horario = horario
        .as_ref()
        .map(horario_core)
        .transpose()
        .map_err(AppError)?;

    let agendamentos = ctx
        .agendamento_repo
        .get_agendamentos_confirmados(local.id, data)
        .await?;
    let ativas = ctx
        .mensalidade_repo
        .get_mensalidades_by_status(local.id, dia, "ativa")
        .await?;

    let mut ocupados = Vec::new();
    for inicio in agendamentos
        .iter()
        .map(|a| a.inicio)
        .chain(ativas.iter().map(|m| m.inicio))
    {
        let inicio = TimeOfDay::try_from(inicio)
            .map_err(|e| AppError(QuadraError::Internal(e.to_string().into())))?;
        ocupados.push(inicio);
    }

    let mut solicitados = Vec::new();
    if visao_locador {
        let pendentes = ctx
            .mensalidade_repo
            .get_mensalidades_by_status(local.id, dia, "solicitada")
            .await?;
        for mensalidade in &pendentes {
            let inicio = TimeOfDay::try_from(mensalidade.inicio)
                .map_err(|e| AppError(QuadraError::Internal(e.to_string().into())))?;
            solicitados.push(inicio);
        }
    }

    Ok(montar_disponibilidade(
        horario.as_ref(),
        &ocupados,
        &solicitados,
        visao_locador,
    ))
}

// 2024-01-08 is a Monday (dia_semana = 1)
fn segunda() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()
}

#[tokio::test]
async fn test_disponibilidade_local_not_found() {
    let mut ctx = TestContext::new();

    ctx.local_repo
        .expect_get_local_by_id()
        .returning(|_| Ok(None));

    let result = test_disponibilidade_wrapper(&mut ctx, 99, segunda(), false).await;

    assert!(result.is_err());
    match result.unwrap_err().0 {
        QuadraError::NotFound(_) => {} // Expected
        e => panic!("Expected NotFound error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_disponibilidade_closed_day_has_no_slots() {
    let mut ctx = TestContext::new();
    let locador_id = Uuid::new_v4();

    ctx.local_repo
        .expect_get_local_by_id()
        .returning(move |id| Ok(Some(db_local(id, locador_id))));
    ctx.local_repo
        .expect_get_horario_by_local_and_dia()
        .returning(|local_id, dia| Ok(Some(db_horario_fechado(local_id, dia))));
    ctx.agendamento_repo
        .expect_get_agendamentos_confirmados()
        .returning(|_, _| Ok(vec![]));
    ctx.mensalidade_repo
        .expect_get_mensalidades_by_status()
        .returning(|_, _, _| Ok(vec![]));

    let disponibilidade = test_disponibilidade_wrapper(&mut ctx, 1, segunda(), false)
        .await
        .expect("closed day still answers");

    assert!(disponibilidade.fechado);
    assert!(disponibilidade.slots.is_empty());
}

#[tokio::test]
async fn test_disponibilidade_missing_weekday_row_is_closed() {
    let mut ctx = TestContext::new();
    let locador_id = Uuid::new_v4();

    ctx.local_repo
        .expect_get_local_by_id()
        .returning(move |id| Ok(Some(db_local(id, locador_id))));
    ctx.local_repo
        .expect_get_horario_by_local_and_dia()
        .returning(|_, _| Ok(None));
    ctx.agendamento_repo
        .expect_get_agendamentos_confirmados()
        .returning(|_, _| Ok(vec![]));
    ctx.mensalidade_repo
        .expect_get_mensalidades_by_status()
        .returning(|_, _, _| Ok(vec![]));

    let disponibilidade = test_disponibilidade_wrapper(&mut ctx, 1, segunda(), false)
        .await
        .unwrap();

    assert!(disponibilidade.fechado);
}

#[tokio::test]
async fn test_disponibilidade_marks_bookings_and_active_subscriptions() {
    let mut ctx = TestContext::new();
    let locador_id = Uuid::new_v4();
    let data = segunda();

    ctx.local_repo
        .expect_get_local_by_id()
        .returning(move |id| Ok(Some(db_local(id, locador_id))));
    ctx.local_repo
        .expect_get_horario_by_local_and_dia()
        .returning(|local_id, dia| Ok(Some(db_horario_aberto(local_id, dia, "09:00", "13:00"))));
    ctx.agendamento_repo
        .expect_get_agendamentos_confirmados()
        .returning(move |local_id, data| Ok(vec![db_agendamento(1, local_id, data, "10:00")]));
    ctx.mensalidade_repo
        .expect_get_mensalidades_by_status()
        .returning(|local_id, dia, status| {
            if status == "ativa" {
                Ok(vec![db_mensalidade(5, local_id, dia, "11:00", "ativa")])
            } else {
                Ok(vec![])
            }
        });

    let disponibilidade = test_disponibilidade_wrapper(&mut ctx, 1, data, false)
        .await
        .unwrap();

    assert!(!disponibilidade.fechado);
    let status: Vec<SlotStatus> = disponibilidade.slots.iter().map(|s| s.status).collect();
    assert_eq!(
        status,
        vec![
            SlotStatus::Livre,   // 09:00
            SlotStatus::Ocupado, // 10:00 confirmed booking
            SlotStatus::Ocupado, // 11:00 active subscription
            SlotStatus::Livre,   // 12:00
        ]
    );
}

#[tokio::test]
async fn test_disponibilidade_pending_requests_owner_view_only() {
    let data = segunda();

    // Player view: the pending request is invisible
    let mut ctx = TestContext::new();
    let locador_id = Uuid::new_v4();
    ctx.local_repo
        .expect_get_local_by_id()
        .returning(move |id| Ok(Some(db_local(id, locador_id))));
    ctx.local_repo
        .expect_get_horario_by_local_and_dia()
        .returning(|local_id, dia| Ok(Some(db_horario_aberto(local_id, dia, "10:00", "12:00"))));
    ctx.agendamento_repo
        .expect_get_agendamentos_confirmados()
        .returning(|_, _| Ok(vec![]));
    ctx.mensalidade_repo
        .expect_get_mensalidades_by_status()
        .returning(|local_id, dia, status| {
            if status == "solicitada" {
                Ok(vec![db_mensalidade(9, local_id, dia, "10:00", "solicitada")])
            } else {
                Ok(vec![])
            }
        });

    let visao_jogador = test_disponibilidade_wrapper(&mut ctx, 1, data, false)
        .await
        .unwrap();
    assert_eq!(visao_jogador.slots[0].status, SlotStatus::Livre);

    // Owner view: the same request renders as solicitado
    let mut ctx = TestContext::new();
    ctx.local_repo
        .expect_get_local_by_id()
        .returning(move |id| Ok(Some(db_local(id, locador_id))));
    ctx.local_repo
        .expect_get_horario_by_local_and_dia()
        .returning(|local_id, dia| Ok(Some(db_horario_aberto(local_id, dia, "10:00", "12:00"))));
    ctx.agendamento_repo
        .expect_get_agendamentos_confirmados()
        .returning(|_, _| Ok(vec![]));
    ctx.mensalidade_repo
        .expect_get_mensalidades_by_status()
        .returning(|local_id, dia, status| {
            if status == "solicitada" {
                Ok(vec![db_mensalidade(9, local_id, dia, "10:00", "solicitada")])
            } else {
                Ok(vec![])
            }
        });

    let visao_locador = test_disponibilidade_wrapper(&mut ctx, 1, data, true)
        .await
        .unwrap();
    assert_eq!(visao_locador.slots[0].status, SlotStatus::Solicitado);
    assert_eq!(visao_locador.slots[1].status, SlotStatus::Livre);
}
