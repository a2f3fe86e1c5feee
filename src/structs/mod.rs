pub mod struct_plugin;
