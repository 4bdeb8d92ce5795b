//! Caixa - terminal register
//!
//! Searches lots, fills the cart and runs the finalize-sale dialog against
//! the back office configured through `PDV_*` variables (or `.env`).

mod logger;
mod page;

use std::sync::Arc;

use anyhow::Context;
use caixa_client::history::SaleHistoryQuery;
use caixa_client::{
    CartDisplay, CartHandle, CartItem, CheckoutBuilder, ClientConfig, CookieJar, LotSearch,
    NetworkHttpClient, PaymentMethod, SaleId, SalesHistory, SubmissionFlow,
};
use page::{TerminalPage, render_modal};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

type Input = Lines<BufReader<Stdin>>;

const HELP: &str = "\
comandos:
  buscar <texto>        busca lotes
  add <n> [qtd]         adiciona o lote n da última busca
  carrinho              mostra o carrinho
  limpar                esvazia o carrinho
  finalizar             abre o diálogo de finalização
  vendas [pagina]       histórico de vendas
  apagar <id>           apaga uma venda e restaura o estoque
  sair";

async fn prompt(input: &mut Input, label: &str) -> anyhow::Result<Option<String>> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(label.as_bytes()).await?;
    stdout.flush().await?;
    Ok(input.next_line().await?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logger::init_logger();

    let config = ClientConfig::from_env().context("invalid PDV_* configuration")?;
    tracing::info!(base_url = %config.base_url, "Caixa starting");

    let mut http = NetworkHttpClient::new(&config)?;
    if let Some(cookies) = &config.cookies {
        http = http.with_csrf(Arc::new(CookieJar::new(cookies.clone(), config.csrf_cookie.clone())));
    } else {
        tracing::warn!("PDV_COOKIES not set, requests will carry no CSRF token");
    }

    let page = Arc::new(TerminalPage::new());
    let cart = CartHandle::new();
    let search = Arc::new(LotSearch::new(http.clone(), config.endpoints.search_lots.clone()));
    let history = SalesHistory::new(http.clone(), config.endpoints.clone());

    let flow = CheckoutBuilder::new(&config)
        .cart(cart.clone())
        .display(page.clone())
        .search(search.clone())
        .notifier(page.clone())
        .build(http)?;

    println!("{}", HELP);
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = prompt(&mut input, "caixa> ").await? {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let rest: Vec<&str> = words.collect();

        match command {
            "buscar" => match search.search(&rest.join(" ")).await {
                Ok(lots) => {
                    for (idx, lot) in lots.iter().enumerate() {
                        println!(
                            "  {:>2}. {:<24} {:<10} estoque {:>5}  R$ {}",
                            idx + 1,
                            lot.nome_produto,
                            lot.codigo_lote,
                            lot.quantidade_estoque,
                            lot.preco_unitario
                        );
                    }
                }
                Err(e) => println!("  erro na busca: {}", e),
            },
            "add" => {
                let index: Option<usize> = rest.first().and_then(|n| n.parse().ok());
                let quantity: u32 = rest.get(1).and_then(|q| q.parse().ok()).unwrap_or(1);
                let results = search.results();
                match index.and_then(|n| n.checked_sub(1)).and_then(|n| results.get(n)) {
                    Some(lot) if quantity > 0 => {
                        cart.push(CartItem::from_lot(lot, quantity));
                        page.refresh(&cart.items());
                    }
                    _ => println!("  uso: add <n> [qtd]"),
                }
            }
            "carrinho" => page.refresh(&cart.items()),
            "limpar" => {
                cart.clear();
                page.refresh(&cart.items());
            }
            "finalizar" => run_checkout(&flow, &mut input).await?,
            "vendas" => {
                let page_number = rest.first().and_then(|p| p.parse().ok()).unwrap_or(1);
                let query = SaleHistoryQuery::default().page(page_number, 10);
                match history.search(&query).await {
                    Ok(result) => {
                        for sale in &result.vendas {
                            println!(
                                "  #{:<6} {}  {:<10} R$ {:>9}  {}",
                                sale.id, sale.data_venda, sale.forma_pagamento, sale.total_venda, sale.status
                            );
                        }
                        println!(
                            "  página {} de {} ({} vendas)",
                            result.pagina_atual, result.total_paginas, result.total_vendas
                        );
                    }
                    Err(e) => println!("  erro no histórico: {}", e),
                }
            }
            "apagar" => match rest.first().and_then(|id| id.parse().ok()) {
                Some(id) => match history.delete(SaleId(id)).await {
                    Ok(message) => println!("  {}", message),
                    Err(e) => println!("  erro ao apagar: {}", e),
                },
                None => println!("  uso: apagar <id>"),
            },
            "sair" => break,
            _ => println!("{}", HELP),
        }
    }

    tracing::info!("Caixa stopped");
    Ok(())
}

/// Finalize-sale dialog loop
async fn run_checkout(
    flow: &SubmissionFlow<NetworkHttpClient>,
    input: &mut Input,
) -> anyhow::Result<()> {
    let modal = flow.modal();
    modal.open();

    while modal.is_open() {
        render_modal(&modal.view());
        let Some(line) = prompt(
            input,
            "[n <nome>] [d]inheiro [p]ix [r <valor>] [c]onfirmar [x] cancelar > ",
        )
        .await?
        else {
            modal.close();
            break;
        };

        let (key, value) = match line.trim().split_once(' ') {
            Some((key, value)) => (key, value.trim()),
            None => (line.trim(), ""),
        };

        match key {
            "n" => modal.set_client_name(value),
            "d" => modal.select_payment_method(PaymentMethod::Cash),
            "p" => modal.select_payment_method(PaymentMethod::Pix),
            "r" => modal.input_tendered(value),
            "c" => {
                if let Err(e) = flow.confirm().await {
                    tracing::debug!(error = %e, kind = ?e.kind(), "Checkout not completed");
                }
            }
            "x" => modal.cancel(),
            _ => {}
        }
    }

    Ok(())
}
