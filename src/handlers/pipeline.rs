// src/handlers/pipeline.rs

use clap::Subcommand;

use crate::{
    common::error::AppError,
    config::AppState,
    models::ids::RecordId,
    services::Outcome,
    ui::Interaction,
    views::board::{BoardView, render_forecast, render_metrics},
};

#[derive(Subcommand, Debug)]
pub enum PipelineCommand {
    /// Mostra o board com os deals em aberto
    Board {
        /// Inclui as métricas
        #[arg(long)]
        metrics: bool,
    },
    Metrics,
    Forecast,
    /// Lista os estágios configurados
    Stages,
    /// Move um deal para outro estágio
    Move { deal_id: RecordId, stage: String },
    /// Marca o deal como ganho (pede confirmação)
    Win { deal_id: RecordId },
    /// Marca o deal como perdido (pergunta o motivo)
    Lose { deal_id: RecordId },
}

pub async fn run(cmd: PipelineCommand, state: &AppState, ui: &dyn Interaction) -> Result<(), AppError> {
    let service = &state.pipeline_service;
    let mut view = BoardView::new();

    match cmd {
        PipelineCommand::Board { metrics } => {
            service.refresh(&mut view, ui).await?;
            if metrics {
                service.refresh_metrics(&mut view, ui).await?;
            }
            print!("{}", view.render());
        }
        PipelineCommand::Metrics => {
            let metrics = service.fetch_metrics().await?;
            print!("{}", render_metrics(&metrics));
        }
        PipelineCommand::Forecast => {
            let forecast = service.fetch_forecast().await?;
            print!("{}", render_forecast(&forecast));
        }
        PipelineCommand::Stages => {
            for stage in service.fetch_stages().await?.stages {
                println!("{}. {} ({})", stage.order, stage.name, stage.color);
            }
        }
        PipelineCommand::Move { deal_id, stage } => {
            service.refresh(&mut view, ui).await?;
            service.begin_drag(&mut view, deal_id);
            if service.drop_on(&mut view, &stage, ui).await? == Outcome::Applied {
                print!("{}", view.render());
            }
        }
        PipelineCommand::Win { deal_id } => {
            if service.win_deal(&mut view, &deal_id, ui).await? == Outcome::Applied {
                print!("{}", view.render());
            }
        }
        PipelineCommand::Lose { deal_id } => {
            if service.lose_deal(&mut view, &deal_id, ui).await? == Outcome::Applied {
                print!("{}", view.render());
            }
        }
    }

    Ok(())
}
