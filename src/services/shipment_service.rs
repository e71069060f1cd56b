// src/services/shipment_service.rs

use std::path::Path;

use genpdf::{elements, style, Element};
use image::Luma;
use qrcode::QrCode;

use crate::{
    common::{csv, error::AppError},
    models::{
        auth::Loja,
        shipment::{FiltroEnvios, PipelineEnvios, Shipment, ShipmentDetail, StatusEnvio},
    },
    services::scope::{aplicar_escopo, Escopo},
    store::ShipmentRepository,
};

// Cabeçalho do modelo de importação em lote, na ordem que o cliente
// sempre ofereceu para download.
const MODELO_IMPORTACAO: [&str; 16] = [
    "remetente_id",
    "destinatario_nome",
    "destinatario_cep",
    "rua",
    "numero",
    "cidade",
    "uf",
    "telefone",
    "email",
    "peso_kg",
    "comprimento_cm",
    "largura_cm",
    "altura_cm",
    "valor_declarado",
    "servicos_adicionais",
    "referencia_externa",
];

#[derive(Clone)]
pub struct ShipmentService {
    repo: ShipmentRepository,
}

impl ShipmentService {
    pub fn new(repo: ShipmentRepository) -> Self {
        Self { repo }
    }

    pub fn listar(&self, escopo: &Escopo, filtro: &FiltroEnvios) -> Vec<Shipment> {
        let no_escopo = aplicar_escopo(&self.repo.listar(), escopo, |s| s.loja_id.as_deref());
        filtrar(&no_escopo, filtro)
    }

    pub fn pipeline(&self, escopo: &Escopo) -> PipelineEnvios {
        let no_escopo = aplicar_escopo(&self.repo.listar(), escopo, |s| s.loja_id.as_deref());
        contar_pipeline(&no_escopo)
    }

    /// Ausência de detalhe é estado vazio, nunca erro.
    pub fn detalhe(&self, order: &str) -> Option<ShipmentDetail> {
        self.repo.detalhe(order)
    }

    /// CSV de exportação; a coluna `loja` só aparece para quem enxerga
    /// múltiplas lojas (ADMIN/DONO), com o nome da loja e fallback no id.
    pub fn exportar_csv(envios: &[Shipment], incluir_loja: bool, lojas: &[Loja]) -> String {
        let mut cabecalho = vec![
            "pedido", "status", "valor", "custo", "margem", "rastreio", "criado_em", "itens",
        ];
        if incluir_loja {
            cabecalho.push("loja");
        }
        let mut linhas = vec![cabecalho.join(",")];
        for envio in envios {
            let itens = envio.items.to_string();
            let mut campos = vec![
                envio.order.as_str(),
                envio.status.rotulo(),
                envio.value.as_str(),
                envio.cost.as_str(),
                envio.margin.as_str(),
                envio.tracking.as_str(),
                envio.created_at.as_str(),
                itens.as_str(),
            ];
            let nome_loja;
            if incluir_loja {
                nome_loja = envio
                    .loja_id
                    .as_ref()
                    .map(|id| {
                        lojas
                            .iter()
                            .find(|l| &l.id == id)
                            .map(|l| l.nome.clone())
                            .unwrap_or_else(|| id.clone())
                    })
                    .unwrap_or_default();
                campos.push(nome_loja.as_str());
            }
            linhas.push(csv::montar_linha(&campos));
        }
        linhas.join("\n")
    }

    /// Modelo em branco para a importação em lote (somente o cabeçalho).
    pub fn modelo_importacao_csv() -> String {
        format!("{}\n", MODELO_IMPORTACAO.join(","))
    }

    /// Etiqueta do envio em PDF, com QR do código de rastreio.
    pub fn etiqueta_pdf(&self, order: &str, fonts_dir: &Path) -> Result<Vec<u8>, AppError> {
        let envio = self
            .repo
            .listar()
            .into_iter()
            .find(|s| s.order == order)
            .ok_or_else(|| AppError::NaoEncontrado(format!("Envio {order} não encontrado.")))?;
        let detalhe = self.repo.detalhe(order);

        // Carrega a fonte da pasta configurada
        let font_family = genpdf::fonts::from_files(fonts_dir, "Roboto", None).map_err(|_| {
            AppError::FonteNaoEncontrada(format!(
                "Fonte não encontrada na pasta {}",
                fonts_dir.display()
            ))
        })?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("Etiqueta {}", envio.order));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        doc.push(
            elements::Paragraph::new("ENVIOFÁCIL — ETIQUETA DE ENVIO")
                .styled(style::Style::new().bold().with_font_size(16)),
        );
        doc.push(elements::Break::new(1));
        doc.push(
            elements::Paragraph::new(format!("Pedido {}", envio.order))
                .styled(style::Style::new().bold().with_font_size(13)),
        );
        doc.push(elements::Paragraph::new(format!("Rastreio: {}", envio.tracking)));
        doc.push(elements::Paragraph::new(format!("Criado em: {}", envio.created_at)));
        doc.push(elements::Paragraph::new(format!("Itens: {}", envio.items)));

        if let Some(det) = &detalhe {
            doc.push(elements::Break::new(1));
            doc.push(elements::Paragraph::new(format!("Origem: {}", det.origin)));
            doc.push(elements::Paragraph::new(format!("Destino: {}", det.destination)));
            doc.push(elements::Paragraph::new(format!(
                "Peso: {} kg — Dimensões: {}x{}x{} cm",
                det.weight_kg, det.dimensions_cm.w, det.dimensions_cm.h, det.dimensions_cm.l
            )));
            doc.push(elements::Paragraph::new(format!(
                "Valor declarado: {}",
                det.declared_value
            )));
            if !det.extras.is_empty() {
                doc.push(elements::Paragraph::new(format!(
                    "Serviços adicionais: {}",
                    det.extras.join(", ")
                )));
            }
        }

        doc.push(elements::Break::new(2));

        // QR do código de rastreio
        let code = QrCode::new(envio.tracking.as_bytes())
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
        let image_buffer = code.render::<Luma<u8>>().build();
        let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);
        let pdf_image = genpdf::elements::Image::from_dynamic_image(dynamic_image)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?
            .with_scale(genpdf::Scale::new(0.5, 0.5));
        doc.push(pdf_image);

        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        Ok(buffer)
    }
}

/// Filtro da listagem: busca em pedido/rastreio (sem caixa), conjunto de
/// status e período inclusivo sobre o `createdAt` textual.
pub fn filtrar(envios: &[Shipment], filtro: &FiltroEnvios) -> Vec<Shipment> {
    envios
        .iter()
        .filter(|s| {
            let ok_q = match &filtro.q {
                None => true,
                Some(q) => {
                    let q = q.to_lowercase();
                    s.order.to_lowercase().contains(&q) || s.tracking.to_lowercase().contains(&q)
                }
            };
            let ok_status = filtro.status.is_empty() || filtro.status.contains(&s.status);
            let ok_data = if filtro.from.is_some() || filtro.to.is_some() {
                let from = filtro.from.as_deref().unwrap_or("");
                // sentinela acima de qualquer data textual
                let to = filtro.to.as_deref().unwrap_or("\u{7f}");
                s.created_at.as_str() >= from && s.created_at.as_str() <= to
            } else {
                true
            };
            ok_q && ok_status && ok_data
        })
        .cloned()
        .collect()
}

/// Contadores do pipeline de status.
pub fn contar_pipeline(envios: &[Shipment]) -> PipelineEnvios {
    let conta = |pred: &dyn Fn(StatusEnvio) -> bool| {
        envios.iter().filter(|s| pred(s.status)).count()
    };
    PipelineEnvios {
        etiqueta: conta(&|s| s == StatusEnvio::LabelGenerated),
        aguardando: conta(&|s| s == StatusEnvio::Ready || s == StatusEnvio::Draft),
        transito: conta(&|s| s == StatusEnvio::InTransit),
        saiu: conta(&|s| s == StatusEnvio::PendingPickup),
        entregue: conta(&|s| s == StatusEnvio::Delivered),
        problema: conta(&|s| s == StatusEnvio::Exception || s == StatusEnvio::Cancelled),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envio(order: &str, status: StatusEnvio, created_at: &str) -> Shipment {
        Shipment {
            order: order.into(),
            status,
            value: "$10.00".into(),
            cost: "$5.00".into(),
            margin: "$5.00".into(),
            tracking: format!("BR{}", order.trim_start_matches(['#', 'O', 'R', 'D', '-'])),
            label: "/placeholder.svg".into(),
            created_at: created_at.into(),
            items: 1,
            loja_id: Some("loja1".into()),
        }
    }

    #[test]
    fn busca_casa_pedido_ou_rastreio_sem_caixa() {
        let envios = vec![
            envio("#ORD-1", StatusEnvio::Ready, "2025-09-01 10:00"),
            envio("#ORD-2", StatusEnvio::Ready, "2025-09-01 10:00"),
        ];
        let filtro = FiltroEnvios {
            q: Some("ord-1".into()),
            ..Default::default()
        };
        let resultado = filtrar(&envios, &filtro);
        assert_eq!(resultado.len(), 1);
        assert_eq!(resultado[0].order, "#ORD-1");
    }

    #[test]
    fn conjunto_de_status_vazio_nao_filtra() {
        let envios = vec![
            envio("#1", StatusEnvio::Ready, "2025-09-01 10:00"),
            envio("#2", StatusEnvio::Delivered, "2025-09-01 10:00"),
        ];
        assert_eq!(filtrar(&envios, &FiltroEnvios::default()).len(), 2);

        let filtro = FiltroEnvios {
            status: vec![StatusEnvio::Delivered],
            ..Default::default()
        };
        assert_eq!(filtrar(&envios, &filtro).len(), 1);
    }

    #[test]
    fn periodo_e_inclusivo_e_aceita_extremos_abertos() {
        let envios = vec![
            envio("#1", StatusEnvio::Ready, "2025-08-31 18:02"),
            envio("#2", StatusEnvio::Ready, "2025-09-01 09:44"),
            envio("#3", StatusEnvio::Ready, "2025-09-02 10:12"),
        ];
        let filtro = FiltroEnvios {
            from: Some("2025-09-01".into()),
            ..Default::default()
        };
        assert_eq!(filtrar(&envios, &filtro).len(), 2);

        let filtro = FiltroEnvios {
            to: Some("2025-09-01 23:59".into()),
            ..Default::default()
        };
        assert_eq!(filtrar(&envios, &filtro).len(), 2);
    }

    #[test]
    fn pipeline_agrupa_os_status_como_a_tela() {
        let envios = vec![
            envio("#1", StatusEnvio::LabelGenerated, "2025-09-01 10:00"),
            envio("#2", StatusEnvio::Ready, "2025-09-01 10:00"),
            envio("#3", StatusEnvio::Draft, "2025-09-01 10:00"),
            envio("#4", StatusEnvio::InTransit, "2025-09-01 10:00"),
            envio("#5", StatusEnvio::PendingPickup, "2025-09-01 10:00"),
            envio("#6", StatusEnvio::Delivered, "2025-09-01 10:00"),
            envio("#7", StatusEnvio::Exception, "2025-09-01 10:00"),
            envio("#8", StatusEnvio::Cancelled, "2025-09-01 10:00"),
        ];
        let pipeline = contar_pipeline(&envios);
        assert_eq!(pipeline.etiqueta, 1);
        assert_eq!(pipeline.aguardando, 2);
        assert_eq!(pipeline.transito, 1);
        assert_eq!(pipeline.saiu, 1);
        assert_eq!(pipeline.entregue, 1);
        assert_eq!(pipeline.problema, 2);
    }

    #[test]
    fn csv_inclui_coluna_de_loja_somente_para_gestores() {
        let envios = vec![envio("#1", StatusEnvio::Delivered, "2025-09-01 10:00")];
        let lojas = vec![Loja { id: "loja1".into(), nome: "Loja Centro".into() }];

        let sem_loja = ShipmentService::exportar_csv(&envios, false, &lojas);
        assert!(sem_loja.starts_with("pedido,status,valor,custo,margem,rastreio,criado_em,itens\n"));
        assert!(!sem_loja.contains("Loja Centro"));

        let com_loja = ShipmentService::exportar_csv(&envios, true, &lojas);
        assert!(com_loja.starts_with("pedido,status,valor,custo,margem,rastreio,criado_em,itens,loja\n"));
        assert!(com_loja.contains("\"Loja Centro\""));
        assert!(com_loja.contains("\"Delivered\""));
    }

    #[test]
    fn modelo_de_importacao_tem_as_dezesseis_colunas() {
        let modelo = ShipmentService::modelo_importacao_csv();
        let cabecalho: Vec<&str> = modelo.trim_end().split(',').collect();
        assert_eq!(cabecalho.len(), 16);
        assert_eq!(cabecalho[0], "remetente_id");
        assert_eq!(cabecalho[15], "referencia_externa");
    }
}
