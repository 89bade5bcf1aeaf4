fn main() {
    // Gera informações de build (versão, perfil, rustc) para o endpoint /health
    built::write_built_file().expect("Falha ao gerar informações de build");
}
