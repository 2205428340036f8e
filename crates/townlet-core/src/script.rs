//! Builders for the JavaScript snippets injected into the browser.
//!
//! The game page polls `/api/js-commands` and evaluates whatever scripts
//! it receives. These builders produce the handful of snippets the bridge
//! ever sends: movement triggers, thought bubbles, status capture and
//! diagnostics. Free text interpolated into a snippet goes through
//! [`js_string`] so quotes and newlines cannot break out of the literal.

/// Escape a string for embedding inside a single- or double-quoted
/// JavaScript literal.
pub fn js_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Movement trigger: asks the game page to start pathfinding toward a
/// named destination.
pub fn move_player(destination: &str) -> String {
    format!("window.mcpMovePlayer(\"{}\");", js_string(destination))
}

/// Thought bubble: shows `texto` in a transient dialogue bubble attached
/// to the player's current position.
pub fn thought_bubble(texto: &str) -> String {
    let texto = js_string(texto);
    format!(
        r"if (typeof startDialogue === 'function' && typeof playerPosition !== 'undefined') {{
    const playerCharacter = {{ name: 'Você', x: playerPosition.x, y: playerPosition.y }};
    const thoughtSequence = [{{ text: '💭 {texto}' }}];
    startDialogue(thoughtSequence, playerCharacter, true, false, []);
}} else {{
    console.error('startDialogue not available or playerPosition undefined');
}}"
    )
}

/// Status capture: reads the live player state from the page and POSTs a
/// full status record back to `/api/player/update-status`.
pub fn status_capture() -> String {
    String::from(
        r"(function() {
    let status = {
        stamina: 100, dinheiro_bolso: 0, dinheiro_banco: 0,
        coordenadas: { x: 1, y: 1 }, localizacao_atual: 'casa', carros: 0
    };
    if (typeof playerPosition !== 'undefined' && playerPosition) {
        status.stamina = playerPosition.stamina || 100;
        status.dinheiro_bolso = playerPosition.moneyInPocket || 0;
        status.dinheiro_banco = playerPosition.moneyInBank || 0;
        status.carros = playerPosition.carros || 0;
        status.coordenadas = { x: playerPosition.x || 1, y: playerPosition.y || 1 };
        if (typeof mapGrid !== 'undefined' && mapGrid[playerPosition.y]) {
            const tile = mapGrid[playerPosition.y][playerPosition.x];
            switch (tile) {
                case 'H': status.localizacao_atual = 'casa'; break;
                case 'B': status.localizacao_atual = 'banco'; break;
                case 'M': status.localizacao_atual = 'mercado'; break;
                case 'W': status.localizacao_atual = 'trabalho'; break;
                case 'C': status.localizacao_atual = 'loja_carros'; break;
                default: status.localizacao_atual = 'area_livre';
            }
        }
    }
    fetch('/api/player/update-status', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ player_status: status })
    }).catch(console.error);
})();",
    )
}

/// Status request: asks the page to report its own status through its
/// reporting helper, falling back to a manual capture-and-POST.
pub fn status_request() -> String {
    String::from(
        r"if (typeof window.sendPlayerStatusToServer === 'function') {
    window.sendPlayerStatusToServer().catch(console.error);
} else if (typeof window.getPlayerStatus === 'function') {
    fetch('/api/player/update-status', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ player_status: window.getPlayerStatus() })
    }).catch(console.error);
} else {
    console.error('no status reporting helper available');
}",
    )
}

/// Diagnostic probe: logs whether the page globals exist and POSTs a
/// sentinel status so the round trip is visible in the cache.
pub fn diagnostic_probe() -> String {
    String::from(
        r"console.log('townlet probe', new Date().toISOString());
console.log('playerPosition defined:', typeof playerPosition !== 'undefined');
console.log('mapGrid defined:', typeof mapGrid !== 'undefined');
fetch('/api/player/update-status', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify({ player_status: {
        stamina: 999, dinheiro_bolso: 999, dinheiro_banco: 999,
        coordenadas: { x: 999, y: 999 }, localizacao_atual: 'teste_js', carros: 999
    } })
}).catch(console.error);",
    )
}
