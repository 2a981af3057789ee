mod font_builder;
