// src/services/finance_service.rs

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::Luma;
use qrcode::QrCode;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        auth::Sessao,
        finance::{
            AtualizarPixPayload, CriarRecargaPayload, Invoice, PixData, ReconciliationItem, Topup,
            TopupStatus, Transaction,
        },
    },
    services::scope::{aplicar_escopo, Escopo},
    store::FinanceRepository,
};

#[derive(Clone)]
pub struct FinanceService {
    repo: FinanceRepository,
}

impl FinanceService {
    pub fn new(repo: FinanceRepository) -> Self {
        Self { repo }
    }

    pub fn recargas(&self, escopo: &Escopo) -> Vec<Topup> {
        aplicar_escopo(&self.repo.listar_topups(), escopo, |t| t.loja_id.as_deref())
    }

    /// Cria uma recarga PIX pendente. A checagem de capacidade vem antes
    /// de qualquer mutação: quem não pode criar recarga recebe a
    /// notificação de permissão e nenhum estado muda.
    pub fn criar_recarga(
        &self,
        sessao: &Sessao,
        payload: &CriarRecargaPayload,
        hoje: String,
    ) -> Result<Topup, AppError> {
        if !sessao.capacidades.criar_recarga {
            return Err(AppError::SemPermissao(
                "Você não tem permissão para gerar recargas PIX.".into(),
            ));
        }

        let loja_id = payload
            .loja_id
            .clone()
            .or_else(|| sessao.loja_atual_id.clone());

        let topup = Topup {
            date: hoje,
            value: formatar_valor(payload.valor),
            status: TopupStatus::Pending,
            txid: gerar_txid(),
            loja_id,
        };
        self.repo.inserir_topup(topup.clone());
        tracing::info!("💳 Recarga PIX criada ({})", topup.txid);
        Ok(topup)
    }

    pub fn pix(&self) -> PixData {
        self.repo.pix()
    }

    /// Atualiza o payload PIX; o QR é renderizado aqui no servidor a
    /// partir do copia-e-cola e devolvido como data-URI PNG.
    pub fn atualizar_pix(&self, payload: &AtualizarPixPayload) -> Result<PixData, AppError> {
        let dados = PixData {
            qr_image: qr_data_uri(&payload.copy_paste)?,
            copy_paste: payload.copy_paste.clone(),
            expires_at: payload.expires_at.clone(),
        };
        self.repo.gravar_pix(dados.clone());
        Ok(dados)
    }

    pub fn transacoes(&self, escopo: &Escopo) -> Vec<Transaction> {
        aplicar_escopo(&self.repo.listar_transactions(), escopo, |t| t.loja_id.as_deref())
    }

    pub fn faturas(&self) -> Vec<Invoice> {
        self.repo.listar_invoices()
    }

    pub fn conciliacao(&self) -> Vec<ReconciliationItem> {
        self.repo.listar_reconciliation()
    }
}

fn formatar_valor(valor: Decimal) -> String {
    format!("${:.2}", valor)
}

fn gerar_txid() -> String {
    let bruto = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("TX-{}", &bruto[..7])
}

/// Renderiza o texto como QR Code e devolve um data-URI `image/png`.
pub fn qr_data_uri(texto: &str) -> Result<String, AppError> {
    let code = QrCode::new(texto.as_bytes())
        .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
    let image_buffer = code.render::<Luma<u8>>().build();
    let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);

    let mut png = Vec::new();
    dynamic_image
        .write_to(&mut png, image::ImageOutputFormat::Png)
        .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

    Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
}
