pub mod qa_article;
