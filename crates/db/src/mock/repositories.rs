use chrono::{NaiveDate, NaiveTime};
use mockall::mock;
use uuid::Uuid;

use crate::models::{
    DbAgendamento, DbHorarioFuncionamento, DbLocal, DbMensalidade, DbSessao, DbUsuario,
};

// Mock repositories for testing
mock! {
    pub UsuarioRepo {
        pub async fn create_usuario(
            &self,
            nome: &'static str,
            email: &'static str,
            senha_hash: &'static str,
            papel: &'static str,
        ) -> eyre::Result<DbUsuario>;

        pub async fn get_usuario_by_email(
            &self,
            email: &'static str,
        ) -> eyre::Result<Option<DbUsuario>>;

        pub async fn get_usuario_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbUsuario>>;

        pub async fn create_sessao(
            &self,
            usuario_id: Uuid,
            ttl_hours: i64,
        ) -> eyre::Result<DbSessao>;

        pub async fn get_sessao(
            &self,
            token: Uuid,
        ) -> eyre::Result<Option<DbSessao>>;
    }
}

mock! {
    pub LocalRepo {
        pub async fn create_local(
            &self,
            locador_id: Uuid,
            nome: &'static str,
            endereco: &'static str,
            cidade: &'static str,
            esporte: &'static str,
            valor_hora: i64,
        ) -> eyre::Result<DbLocal>;

        pub async fn get_local_by_id(
            &self,
            id: i64,
        ) -> eyre::Result<Option<DbLocal>>;

        pub async fn list_locais_by_locador(
            &self,
            locador_id: Uuid,
        ) -> eyre::Result<Vec<DbLocal>>;

        pub async fn upsert_horario(
            &self,
            local_id: i64,
            dia_semana: i16,
            aberto: bool,
            abertura: Option<NaiveTime>,
            fechamento: Option<NaiveTime>,
        ) -> eyre::Result<DbHorarioFuncionamento>;

        pub async fn get_horarios_by_local(
            &self,
            local_id: i64,
        ) -> eyre::Result<Vec<DbHorarioFuncionamento>>;

        pub async fn get_horario_by_local_and_dia(
            &self,
            local_id: i64,
            dia_semana: i16,
        ) -> eyre::Result<Option<DbHorarioFuncionamento>>;
    }
}

mock! {
    pub AgendamentoRepo {
        pub async fn create_agendamento(
            &self,
            local_id: i64,
            jogador_id: Uuid,
            data: NaiveDate,
            inicio: NaiveTime,
        ) -> eyre::Result<DbAgendamento>;

        pub async fn get_agendamento_by_id(
            &self,
            id: i64,
        ) -> eyre::Result<Option<DbAgendamento>>;

        pub async fn get_agendamento_confirmado(
            &self,
            local_id: i64,
            data: NaiveDate,
            inicio: NaiveTime,
        ) -> eyre::Result<Option<DbAgendamento>>;

        pub async fn get_agendamentos_confirmados(
            &self,
            local_id: i64,
            data: NaiveDate,
        ) -> eyre::Result<Vec<DbAgendamento>>;

        pub async fn cancelar_agendamento(
            &self,
            id: i64,
        ) -> eyre::Result<DbAgendamento>;
    }
}

mock! {
    pub MensalidadeRepo {
        pub async fn create_mensalidade(
            &self,
            local_id: i64,
            jogador_id: Uuid,
            dia_semana: i16,
            inicio: NaiveTime,
        ) -> eyre::Result<DbMensalidade>;

        pub async fn get_mensalidade_by_id(
            &self,
            id: i64,
        ) -> eyre::Result<Option<DbMensalidade>>;

        pub async fn get_mensalidades_by_status(
            &self,
            local_id: i64,
            dia_semana: i16,
            status: &'static str,
        ) -> eyre::Result<Vec<DbMensalidade>>;

        pub async fn get_mensalidade_ativa(
            &self,
            local_id: i64,
            dia_semana: i16,
            inicio: NaiveTime,
        ) -> eyre::Result<Option<DbMensalidade>>;

        pub async fn atualizar_status_mensalidade(
            &self,
            id: i64,
            status: &'static str,
        ) -> eyre::Result<DbMensalidade>;
    }
}
