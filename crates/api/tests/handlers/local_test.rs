use chrono::NaiveTime;
use pretty_assertions::assert_eq;
use quadra_api::middleware::error_handling::AppError;
use quadra_core::{
    errors::QuadraError,
    models::local::{HorarioFuncionamento, LocalResponse},
    time::TimeOfDay,
};
use uuid::Uuid;

use crate::test_utils::{db_horario_aberto, TestContext};

fn hora(texto: &str) -> TimeOfDay {
    TimeOfDay::parse(texto).unwrap()
}

fn aberto(dia_semana: u8, abertura: &str, fechamento: &str) -> HorarioFuncionamento {
    HorarioFuncionamento {
        dia_semana,
        aberto: true,
        abertura: Some(hora(abertura)),
        fechamento: Some(hora(fechamento)),
    }
}

fn horario_core(
    row: &quadra_db::models::DbHorarioFuncionamento,
) -> Result<HorarioFuncionamento, QuadraError> {
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

fn validar_horario(horario: &HorarioFuncionamento) -> Result<(), AppError> {
    if horario.dia_semana > 6 {
        return Err(AppError(QuadraError::Validation(format!(
            "Dia da semana inválido: {}",
            horario.dia_semana
        ))));
    }
    if horario.aberto && horario.janela().is_none() {
        return Err(AppError(QuadraError::Validation(format!(
            "Horário de funcionamento inválido para o dia {}: abertura deve ser anterior ao fechamento",
            horario.dia_semana
        ))));
    }
    Ok(())
}

// Mirror of the court-creation handler's decision flow, against mock repositories
async fn test_criar_local_wrapper(
    ctx: &mut TestContext,
    locador_id: Uuid,
    nome: &'static str,
    horarios: Vec<HorarioFuncionamento>,
) -> Result<LocalResponse, AppError> {
    if nome.trim().is_empty() {
        return Err(AppError(QuadraError::Validation(
            "Nome do local é obrigatório".to_string(),
        )));
    }
    for horario in &horarios {
        validar_horario(horario)?;
    }

    let local = ctx
        .local_repo
        .create_local(
            locador_id,
            nome,
            "Rua das Palmeiras, 100",
            "São Paulo",
            "futsal",
            12_000,
        )
        .await?;

    for horario in &horarios {
        let abertura: Option<NaiveTime> = horario.abertura.map(Into::into);
        let fechamento: Option<NaiveTime> = horario.fechamento.map(Into::into);
        ctx.local_repo
            .upsert_horario(
                local.id,
                horario.dia_semana as i16,
                horario.aberto,
                abertura,
                fechamento,
            )
            .await?;
    }

    let persistidos = ctx.local_repo.get_horarios_by_local(local.id).await?;
    let mut convertidos = Vec::with_capacity(persistidos.len());
    for row in &persistidos {
        convertidos.push(horario_core(row).map_err(AppError)?);
    }

    Ok(LocalResponse {
        id: local.id,
        nome: local.nome,
        endereco: local.endereco,
        cidade: local.cidade,
        esporte: local.esporte,
        valor_hora: local.valor_hora,
        horarios: convertidos,
    })
}

#[tokio::test]
async fn test_criar_local_rejects_empty_name() {
    let mut ctx = TestContext::new();

    let result = test_criar_local_wrapper(&mut ctx, Uuid::new_v4(), "  ", vec![]).await;

    assert!(result.is_err());
    match result.unwrap_err().0 {
        QuadraError::Validation(_) => {} // Expected
        e => panic!("Expected Validation error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_criar_local_rejects_invalid_weekday() {
    let mut ctx = TestContext::new();

    let result = test_criar_local_wrapper(
        &mut ctx,
        Uuid::new_v4(),
        "Quadra Central",
        vec![aberto(7, "09:00", "18:00")],
    )
    .await;

    assert!(result.is_err());
    match result.unwrap_err().0 {
        QuadraError::Validation(msg) => assert!(msg.contains("Dia da semana")),
        e => panic!("Expected Validation error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_criar_local_rejects_inverted_window() {
    let mut ctx = TestContext::new();

    // Opening after closing never reaches the repository.
    let result = test_criar_local_wrapper(
        &mut ctx,
        Uuid::new_v4(),
        "Quadra Central",
        vec![aberto(1, "18:00", "08:00")],
    )
    .await;

    assert!(result.is_err());
    match result.unwrap_err().0 {
        QuadraError::Validation(msg) => assert!(msg.contains("abertura")),
        e => panic!("Expected Validation error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_criar_local_rejects_open_day_without_window() {
    let mut ctx = TestContext::new();

    let sem_janela = HorarioFuncionamento {
        dia_semana: 2,
        aberto: true,
        abertura: None,
        fechamento: None,
    };
    let result =
        test_criar_local_wrapper(&mut ctx, Uuid::new_v4(), "Quadra Central", vec![sem_janela])
            .await;

    assert!(result.is_err());
    assert!(matches!(result.unwrap_err().0, QuadraError::Validation(_)));
}

#[tokio::test]
async fn test_criar_local_persists_schedule() {
    let mut ctx = TestContext::new();
    let locador_id = Uuid::new_v4();

    ctx.local_repo
        .expect_create_local()
        .times(1)
        .returning(|locador_id, _, _, _, _, _| Ok(crate::test_utils::db_local(7, locador_id)));
    ctx.local_repo
        .expect_upsert_horario()
        .times(2)
        .returning(|local_id, dia, _, _, _| Ok(db_horario_aberto(local_id, dia, "09:00", "18:00")));
    ctx.local_repo
        .expect_get_horarios_by_local()
        .returning(|local_id| {
            Ok(vec![
                db_horario_aberto(local_id, 1, "09:00", "18:00"),
                db_horario_aberto(local_id, 2, "09:00", "18:00"),
            ])
        });

    let response = test_criar_local_wrapper(
        &mut ctx,
        locador_id,
        "Quadra Central",
        vec![aberto(1, "09:00", "18:00"), aberto(2, "09:00", "18:00")],
    )
    .await
    .expect("valid schedule is accepted");

    assert_eq!(response.id, 7);
    assert_eq!(response.horarios.len(), 2);
}
